//! Request handling from raw event to response envelope.
//!
//! The handler wires the pipeline together:
//! 1. **Parse**: Extract the JSON body from the event
//! 2. **Mock**: Short-circuit to the fixture when `ismock` is set
//! 3. **Validate**: Normalize categories and filter the client list
//! 4. **Fan out**: Query every client through the [`SearchApi`]
//! 5. **Assemble**: Wrap the outcome in a [`ResponseEnvelope`]
//!
//! Request-level errors stop the pipeline before anything is dispatched.

use crate::api::SearchApi;
use crate::config::Config;
use crate::errors::HandlerError;
use crate::mock::load_fixture;
use crate::models::default_categories;
use crate::orchestrator::FanOut;
use crate::response::ResponseEnvelope;
use crate::utils::{json_kind, NewsWindow};
use crate::validate::validate_clients;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument};

/// Request handler bound to one configuration and an optional gateway.
///
/// A `None` gateway means no credential was configured; requests that get
/// past validation then fail with [`HandlerError::MissingCredential`].
#[derive(Debug)]
pub struct Handler<A> {
    config: Config,
    api: Option<A>,
}

impl<A: SearchApi> Handler<A> {
    pub fn new(config: Config, api: Option<A>) -> Self {
        Self { config, api }
    }

    /// Handle one event and produce its response envelope.
    #[instrument(level = "info", skip_all)]
    pub async fn handle(&self, event: &Value) -> ResponseEnvelope {
        match self.try_handle(event).await {
            Ok(envelope) => {
                info!(status = envelope.status_code, "Request handled");
                envelope
            }
            Err(e) => {
                error!(status = e.status_code(), error = %e, "Request rejected");
                e.into()
            }
        }
    }

    async fn try_handle(&self, event: &Value) -> Result<ResponseEnvelope, HandlerError> {
        let body = parse_body(event)?;

        if is_mock(&body) {
            info!(fixture = %self.config.mock_fixture.display(), "Mock mode requested");
            let fixture = load_fixture(&self.config.mock_fixture).await?;
            return Ok(ResponseEnvelope::json(200, &fixture));
        }

        let categories = parse_categories(body.get("categories"))?;
        let clients = validate_clients(body.get("clients"))?;

        let window = NewsWindow::current();
        debug!(from = %window.from, to = %window.to, ?categories, "News window");

        let api = self.api.as_ref().ok_or(HandlerError::MissingCredential)?;
        let results = FanOut::new(api, &self.config.model, self.config.max_workers)
            .run(clients, &categories)
            .await;
        Ok(ResponseEnvelope::clients(results))
    }
}

/// Extract the request body from an event.
///
/// The body may be a JSON-encoded string or an inline object.
///
/// # Arguments
///
/// * `event` - The incoming event, expected to carry a `body` field
///
/// # Returns
///
/// The body as a JSON object map.
///
/// # Errors
///
/// [`HandlerError::InvalidInput`] when the body is missing, unparsable, or
/// not an object.
pub fn parse_body(event: &Value) -> Result<Map<String, Value>, HandlerError> {
    let body = match event.get("body") {
        None | Some(Value::Null) => {
            return Err(HandlerError::invalid_input("request body is missing"));
        }
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|e| HandlerError::invalid_input(e.to_string()))?,
        Some(other) => other.clone(),
    };
    match body {
        Value::Object(map) => Ok(map),
        other => Err(HandlerError::invalid_input(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Categories from the body, or the defaults when absent or `null`.
pub fn parse_categories(raw: Option<&Value>) -> Result<Vec<String>, HandlerError> {
    let items = match raw {
        None | Some(Value::Null) => return Ok(default_categories()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(HandlerError::invalid_input(format!(
                "categories must be an array of strings, got {}",
                json_kind(other)
            )));
        }
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                HandlerError::invalid_input(format!(
                    "categories must be an array of strings, found {}",
                    json_kind(item)
                ))
            })
        })
        .collect()
}

fn is_mock(body: &Map<String, Value>) -> bool {
    body.get("ismock").and_then(Value::as_bool).unwrap_or(false)
}
