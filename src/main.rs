//! Command-line entry point: one request in, one response envelope out.
//!
//! ## Usage
//!
//! ```sh
//! echo '{"clients": [{"name": "Acme"}]}' | client_news_digest
//! ```

use clap::Parser;
use client_news_digest::cli::Cli;
use client_news_digest::{Config, Handler, PerplexityClient};
use serde_json::{json, Value};
use std::error::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("client_news_digest starting up");

    let args = Cli::parse();
    debug!(input = ?args.input, config = ?args.config, "Parsed CLI arguments");

    // ---- Configuration ----
    let config = args.apply(Config::load(args.config.as_deref()).await?);
    config.validate()?;
    debug!(?config, "Effective configuration");

    let api = match config.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Some(PerplexityClient::new(key, &config)?),
        None => {
            warn!("No Perplexity API key configured; live requests will be rejected");
            None
        }
    };
    let handler = Handler::new(config, api);

    // ---- Request ----
    let raw = read_input(&args).await?;
    let event = if args.event {
        parse_or_string(raw)
    } else {
        json!({ "body": parse_or_string(raw) })
    };

    let envelope = handler.handle(&event).await;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{rendered}");

    let elapsed = start_time.elapsed();
    info!(
        status = envelope.status_code,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn read_input(args: &Cli) -> Result<String, Box<dyn Error>> {
    let raw = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    Ok(raw)
}

/// Non-JSON input is passed along as a string so the handler reports it.
fn parse_or_string(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}
