//! Data models for client queries, upstream payloads, and aggregated results.
//!
//! This module defines the structures that flow through one invocation:
//! - [`ClientSpec`]: A validated client eligible for querying
//! - [`ChatRequest`] / [`ChatCompletion`]: Outbound payload and upstream envelope
//! - [`ClientResult`]: One client's outcome, either data or error
//! - [`ClientsBody`]: The aggregated body of a successful response
//!
//! Some field names (`Name`, `AI_Summary`) are dictated by the JSON contract
//! consumers already rely on, hence the explicit serde renames.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Categories queried when the request does not name any.
pub const DEFAULT_CATEGORIES: [&str; 4] = [
    "Latest Headlines",
    "Acquisitions",
    "Management Updates",
    "Financials",
];

/// Returns [`DEFAULT_CATEGORIES`] as owned labels.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// A client that passed validation.
///
/// `name` is guaranteed non-empty; `url` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSpec {
    pub name: String,
    pub url: Option<String>,
}

/// One chat message sent to the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// The subset of the upstream completion envelope we read.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

/// Message inside a completion choice. Only `content` is read; `role` and
/// any other fields are optional upstream and ignored here.
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

impl ChatCompletion {
    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// The well-formed empty payload substituted for unparsable upstream output.
pub fn fallback_data() -> Value {
    json!({
        "usage": {},
        "citations": [],
        "search_results": []
    })
}

/// Outcome of one client's query. Serialized flat as either `"data"` or `"error"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    #[serde(rename = "data")]
    Data(Value),
    #[serde(rename = "error")]
    Error(String),
}

/// One entry of the `clients` array in a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientResult {
    #[serde(rename = "Name")]
    pub name: String,
    pub url: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ClientResult {
    pub fn data(client: ClientSpec, data: Value) -> Self {
        Self {
            name: client.name,
            url: client.url,
            outcome: Outcome::Data(data),
        }
    }

    pub fn error(client: ClientSpec, error: impl Into<String>) -> Self {
        Self {
            name: client.name,
            url: client.url,
            outcome: Outcome::Error(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// Body of a 200 response: all client results in completion order.
#[derive(Debug, Serialize)]
pub struct ClientsBody {
    pub clients: Vec<ClientResult>,
}
