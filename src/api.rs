//! Search API interaction.
//!
//! This module provides the gateway to the Perplexity `chat/completions`
//! endpoint:
//! - [`SearchApi`]: Core trait for one outbound search call
//! - [`PerplexityClient`]: `reqwest`-backed implementation with a hard timeout
//! - [`decode_content`]: Two-stage decode of the model's free-text answer
//!
//! Calls are never retried; a failed call is reported as that client's error.

use crate::config::Config;
use crate::errors::GatewayError;
use crate::models::{fallback_data, ChatCompletion, ChatRequest};
use crate::utils::{json_kind, looks_truncated, truncate_for_log};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Bytes of an upstream error body kept in the client's error message.
const ERROR_BODY_PREVIEW: usize = 300;

/// Trait for one search call against the upstream API.
///
/// Implementors send a chat request and return the decoded `data` object for
/// the client. Transport and HTTP failures come back as [`GatewayError`];
/// malformed model output does not fail the call.
pub trait SearchApi {
    async fn search(&self, request: &ChatRequest) -> Result<Value, GatewayError>;
}

/// Gateway client for the Perplexity API.
///
/// The credential is handed in at construction and baked into the default
/// headers; nothing here reads the environment.
pub struct PerplexityClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl std::fmt::Debug for PerplexityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityClient")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PerplexityClient {
    /// Build a client that authenticates with `api_key`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer credential sent on every request
    /// * `config` - Supplies the endpoint and the per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(api_key: &str, config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            GatewayError::Transport(e)
        }
    }
}

impl SearchApi for PerplexityClient {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint))]
    async fn search(&self, request: &ChatRequest) -> Result<Value, GatewayError> {
        let t0 = Instant::now();
        debug!(model = %request.model, "Sending search request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        info!(
            %status,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Search API responded"
        );
        debug!(body = %truncate_for_log(&body, 500), "Search API response body");

        if !status.is_success() {
            return Err(GatewayError::Status {
                status,
                body: truncate_for_log(&body, ERROR_BODY_PREVIEW),
            });
        }

        let completion: ChatCompletion = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedEnvelope(e.to_string()))?;
        let content = completion.first_content().ok_or_else(|| {
            GatewayError::MalformedEnvelope("response has no choices".to_string())
        })?;

        Ok(decode_content(content))
    }
}

/// Decode model output into a JSON object, falling back to [`fallback_data`].
///
/// The first stage is a strict parse. Anything that is not a JSON object
/// (prose, a truncated object, a bare array) is replaced by the fallback.
/// This function never fails.
///
/// # Arguments
///
/// * `content` - The `choices[0].message.content` string from the upstream reply
///
/// # Returns
///
/// The parsed object, or [`fallback_data`] when parsing does not yield one.
pub fn decode_content(content: &str) -> Value {
    match serde_json::from_str::<Value>(content) {
        Ok(value @ Value::Object(_)) => value,
        Ok(other) => {
            warn!(
                kind = json_kind(&other),
                "Model returned JSON that is not an object; using fallback"
            );
            fallback_data()
        }
        Err(e) => {
            warn!(
                truncated = looks_truncated(&e),
                error = %e,
                content_preview = %truncate_for_log(content, 300),
                "Model returned non-conforming JSON; using fallback"
            );
            fallback_data()
        }
    }
}
