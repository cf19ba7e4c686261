//! Response envelope assembly.
//!
//! Every invocation ends in exactly one [`ResponseEnvelope`]: a status code,
//! a JSON content-type header, and a JSON-encoded body string.

use crate::errors::HandlerError;
use crate::models::{ClientResult, ClientsBody};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// The externally visible result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// Encode `body` as JSON under `status_code`.
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self::with_body(status_code, body),
            Err(e) => {
                error!(error = %e, "Failed to encode response body");
                Self::with_body(500, r#"{"error": "Failed to encode response"}"#.to_string())
            }
        }
    }

    /// 200 response carrying every client result.
    pub fn clients(results: Vec<ClientResult>) -> Self {
        Self::json(200, &ClientsBody { clients: results })
    }

    /// Error response for a request-level failure.
    pub fn from_error(err: &HandlerError) -> Self {
        Self::json(err.status_code(), &err.body())
    }

    fn with_body(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }
}

impl From<HandlerError> for ResponseEnvelope {
    fn from(err: HandlerError) -> Self {
        Self::from_error(&err)
    }
}

#[cfg(test)]
impl ResponseEnvelope {
    pub(crate) fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientSpec;
    use serde_json::json;

    #[test]
    fn test_envelope_field_names() {
        let envelope = ResponseEnvelope::from_error(&HandlerError::NoValidClients);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert!(value["body"].is_string());
    }

    #[test]
    fn test_no_valid_clients_envelope() {
        let envelope: ResponseEnvelope = HandlerError::NoValidClients.into();
        assert_eq!(envelope.status_code, 400);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "error": "No valid clients provided" })
        );
    }

    #[test]
    fn test_missing_credential_envelope() {
        let envelope: ResponseEnvelope = HandlerError::MissingCredential.into();
        assert_eq!(envelope.status_code, 500);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "error": "Perplexity API key not set" })
        );
    }

    #[test]
    fn test_clients_envelope() {
        let client = ClientSpec {
            name: "Acme".to_string(),
            url: None,
        };
        let envelope = ResponseEnvelope::clients(vec![ClientResult::error(client, "boom")]);
        assert_eq!(envelope.status_code, 200);
        assert_eq!(
            envelope.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({ "clients": [{ "Name": "Acme", "url": null, "error": "boom" }] })
        );
    }
}
