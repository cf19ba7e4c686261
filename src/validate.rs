//! Client list validation.
//!
//! Raw client records arrive with arbitrary shape. Records without a usable
//! name are dropped silently; the caller only learns about the problem when
//! nothing survives.

use crate::errors::HandlerError;
use crate::models::ClientSpec;
use crate::utils::json_kind;
use serde_json::Value;
use tracing::{debug, instrument};

/// Filter and normalize the raw `clients` value of a request body.
///
/// A missing or `null` value is treated as an empty list. Each element must
/// be an object with a non-empty string `name`; `url` is kept when it is a
/// string and dropped otherwise.
///
/// # Arguments
///
/// * `raw` - The `clients` field of the request body, if present
///
/// # Returns
///
/// The surviving clients in input order.
///
/// # Errors
///
/// - [`HandlerError::InvalidInput`] when `clients` is present but not an array
/// - [`HandlerError::NoValidClients`] when no record survives filtering
#[instrument(level = "debug", skip_all)]
pub fn validate_clients(raw: Option<&Value>) -> Result<Vec<ClientSpec>, HandlerError> {
    let records = match raw {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(records)) => records.as_slice(),
        Some(other) => {
            return Err(HandlerError::invalid_input(format!(
                "clients must be an array, got {}",
                json_kind(other)
            )));
        }
    };

    let clients: Vec<ClientSpec> = records.iter().filter_map(client_from_record).collect();

    let rejected = records.len() - clients.len();
    debug!(accepted = clients.len(), rejected, "Validated client records");

    if clients.is_empty() {
        return Err(HandlerError::NoValidClients);
    }
    Ok(clients)
}

fn client_from_record(record: &Value) -> Option<ClientSpec> {
    let name = record.get("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    let url = record.get("url").and_then(Value::as_str).map(str::to_string);
    Some(ClientSpec {
        name: name.to_string(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drops_records_without_name() {
        let raw = json!([{ "name": "Acme" }, { "name": "" }, { "url": "https://x.example" }]);
        let clients = validate_clients(Some(&raw)).unwrap();
        assert_eq!(
            clients,
            vec![ClientSpec {
                name: "Acme".to_string(),
                url: None
            }]
        );
    }

    #[test]
    fn test_keeps_url_when_present() {
        let raw = json!([
            { "name": "Acme", "url": "https://acme.example" },
            { "name": "Globex", "url": null }
        ]);
        let clients = validate_clients(Some(&raw)).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].url.as_deref(), Some("https://acme.example"));
        assert_eq!(clients[1].url, None);
    }

    #[test]
    fn test_drops_non_object_and_non_string_names() {
        let raw = json!(["Acme", 42, null, { "name": 7 }, { "name": null }, { "name": "Initech" }]);
        let clients = validate_clients(Some(&raw)).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Initech");
    }

    #[test]
    fn test_non_string_url_is_treated_as_absent() {
        let raw = json!([{ "name": "Acme", "url": 12 }]);
        let clients = validate_clients(Some(&raw)).unwrap();
        assert_eq!(clients[0].url, None);
    }

    #[test]
    fn test_whitespace_name_is_kept() {
        let raw = json!([{ "name": " " }]);
        let clients = validate_clients(Some(&raw)).unwrap();
        assert_eq!(clients[0].name, " ");
    }

    #[test]
    fn test_empty_after_filtering_is_an_error() {
        let raw = json!([{ "name": "" }, {}]);
        let err = validate_clients(Some(&raw)).unwrap_err();
        assert!(matches!(err, HandlerError::NoValidClients));
    }

    #[test]
    fn test_missing_clients_is_an_error() {
        assert!(matches!(
            validate_clients(None).unwrap_err(),
            HandlerError::NoValidClients
        ));
        assert!(matches!(
            validate_clients(Some(&Value::Null)).unwrap_err(),
            HandlerError::NoValidClients
        ));
    }

    #[test]
    fn test_non_array_clients_is_invalid_input() {
        let raw = json!({ "name": "Acme" });
        match validate_clients(Some(&raw)).unwrap_err() {
            HandlerError::InvalidInput { details } => {
                assert_eq!(details, "clients must be an array, got object")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
