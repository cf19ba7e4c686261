//! Runtime configuration.
//!
//! Settings come from an optional YAML file; the binary then layers CLI
//! flags and environment variables on top. Everything here is plain data
//! handed to the gateway and handler at construction.

use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const DEFAULT_MOCK_FIXTURE: &str = "mock/apiresponse.json";

/// Handler and gateway settings.
///
/// # Example
///
/// ```yaml
/// endpoint: https://api.perplexity.ai/chat/completions
/// model: sonar
/// timeout_secs: 300
/// max_workers: 10
/// mock_fixture: mock/apiresponse.json
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bearer credential for the search API. Usually supplied by
    /// `PERPLEXITY_API_KEY` rather than the file.
    pub api_key: Option<String>,
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Hard ceiling for a single outbound call.
    pub timeout_secs: u64,
    /// Upper bound on concurrent outbound calls per invocation.
    pub max_workers: usize,
    /// Fixture returned verbatim when a request sets `ismock`.
    pub mock_fixture: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_workers: DEFAULT_MAX_WORKERS,
            mock_fixture: PathBuf::from(DEFAULT_MOCK_FIXTURE),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_workers", &self.max_workers)
            .field("mock_fixture", &self.mock_fixture)
            .finish()
    }
}

impl Config {
    /// Parse configuration from YAML text. Missing keys take their defaults.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a YAML file
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] or [`ConfigError::Parse`] when the file cannot be
    /// used. Validation is left to [`Config::validate`].
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_string(),
                source,
            })?;
        let config = Self::from_yaml(&text, path)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    /// Check that the settings are usable before anything is dispatched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Endpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme {}", endpoint.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "timeout_secs",
            });
        }
        if self.max_workers == 0 {
            return Err(ConfigError::Zero {
                field: "max_workers",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "https://api.perplexity.ai/chat/completions");
        assert_eq!(config.model, "sonar");
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.max_workers, 10);
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("model: sonar-pro\nmax_workers: 4\n", "inline").unwrap();
        assert_eq!(config.model, "sonar-pro");
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.mock_fixture, PathBuf::from("mock/apiresponse.json"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_yaml("modle: sonar\n", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_endpoint = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            bad_endpoint.validate(),
            Err(ConfigError::Endpoint { .. })
        ));

        let ftp = Config {
            endpoint: "ftp://api.example/chat".to_string(),
            ..Config::default()
        };
        assert!(matches!(ftp.validate(), Err(ConfigError::Endpoint { .. })));

        let zero_workers = Config {
            max_workers: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_workers.validate(),
            Err(ConfigError::Zero {
                field: "max_workers"
            })
        ));

        let zero_timeout = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_timeout.validate(),
            Err(ConfigError::Zero {
                field: "timeout_secs"
            })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: Some("pplx-secret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pplx-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let err = Config::load(Some("/nonexistent/client_news_digest.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
