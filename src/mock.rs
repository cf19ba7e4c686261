//! Static fixture responses for `ismock` requests.

use crate::errors::HandlerError;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Load the fixture document at `path`.
///
/// # Arguments
///
/// * `path` - Location of the JSON fixture
///
/// # Returns
///
/// The parsed fixture, returned to the caller unchanged.
///
/// # Errors
///
/// [`HandlerError::MockLoadFailure`] when the file is unreadable or not JSON.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_fixture(path: &Path) -> Result<Value, HandlerError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!(error = %e, "Mock fixture unreadable");
        HandlerError::MockLoadFailure {
            details: format!("{}: {e}", path.display()),
        }
    })?;
    let fixture = serde_json::from_str(&text).map_err(|e| {
        warn!(error = %e, "Mock fixture is not valid JSON");
        HandlerError::MockLoadFailure {
            details: format!("{}: {e}", path.display()),
        }
    })?;
    info!(bytes = text.len(), "Loaded mock fixture");
    Ok(fixture)
}
