//! Error types for the request handler, the search gateway, and configuration.
//!
//! Errors fall into three tiers:
//! - [`HandlerError`]: request-level failures that short-circuit before any
//!   outbound call and become the sole response.
//! - [`GatewayError`]: per-client failures captured inline in that client's
//!   result; they never fail the overall request.
//! - [`ConfigError`]: startup failures surfaced by the binary.

use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Request-level failure. Each variant maps to one status code and body.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request body is missing, not JSON, or has the wrong shape.
    #[error("Invalid input")]
    InvalidInput { details: String },

    /// Every client record was dropped by validation.
    #[error("No valid clients provided")]
    NoValidClients,

    /// No API credential was configured for the search gateway.
    #[error("Perplexity API key not set")]
    MissingCredential,

    /// Mock mode was requested but the fixture could not be loaded.
    #[error("Failed to load mock response")]
    MockLoadFailure { details: String },
}

impl HandlerError {
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput {
            details: details.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::NoValidClients => 400,
            Self::MissingCredential | Self::MockLoadFailure { .. } => 500,
        }
    }

    /// The JSON body reported to the caller.
    pub fn body(&self) -> Value {
        match self {
            Self::InvalidInput { details } | Self::MockLoadFailure { details } => {
                json!({ "error": self.to_string(), "details": details })
            }
            Self::NoValidClients | Self::MissingCredential => json!({ "error": self.to_string() }),
        }
    }
}

/// Failure of a single outbound search call.
///
/// The `Display` text is what ends up in the client's `error` field.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response from upstream: {0}")]
    MalformedEnvelope(String),
}

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid endpoint {endpoint:?}: {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}
