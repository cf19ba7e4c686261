//! Command-line interface definitions for Client News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Settings given here override the YAML configuration file.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Client News Digest binary.
///
/// The binary reads one request (a file or stdin), runs it through the
/// handler, and prints the response envelope as JSON on stdout.
///
/// # Examples
///
/// ```sh
/// # Request body from a file, key from the environment
/// PERPLEXITY_API_KEY=pplx-... client_news_digest request.json
///
/// # Full event from stdin, fewer workers
/// cat event.json | client_news_digest --event --max-workers 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Request file to read; stdin when omitted
    pub input: Option<PathBuf>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Perplexity API key
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Treat the input as a full event (`{"body": ...}`) instead of a bare body
    #[arg(long)]
    pub event: bool,

    /// Maximum concurrent outbound requests
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Fixture returned for `ismock` requests
    #[arg(long)]
    pub mock_fixture: Option<PathBuf>,

    /// Pretty-print the response envelope
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Layer the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            config.api_key = Some(key.clone());
        }
        if let Some(n) = self.max_workers {
            config.max_workers = n;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(path) = &self.mock_fixture {
            config.mock_fixture = path.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "client_news_digest",
            "request.json",
            "--config",
            "./config.yaml",
            "--max-workers",
            "4",
            "--pretty",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("request.json")));
        assert_eq!(cli.config.as_deref(), Some("./config.yaml"));
        assert_eq!(cli.max_workers, Some(4));
        assert!(cli.pretty);
        assert!(!cli.event);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["client_news_digest", "-c", "/tmp/config.yaml", "--event"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/config.yaml"));
        assert!(cli.input.is_none());
        assert!(cli.event);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "client_news_digest",
            "--api-key",
            "pplx-test",
            "--timeout-secs",
            "30",
            "--mock-fixture",
            "fixtures/mock.json",
        ]);
        let config = cli.apply(Config::default());
        assert_eq!(config.api_key.as_deref(), Some("pplx-test"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.mock_fixture, PathBuf::from("fixtures/mock.json"));
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let cli = Cli::parse_from(["client_news_digest", "--api-key", ""]);
        let config = cli.apply(Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        });
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }
}
