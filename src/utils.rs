//! Small helpers shared across the pipeline.
//!
//! - Log-friendly truncation of upstream payloads
//! - Classification of JSON values and decode errors
//! - The date window a news query covers

use chrono::{Duration, NaiveDate, Utc};

/// Days covered by one news query window.
pub const NEWS_WINDOW_DAYS: i64 = 90;

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest preceding char
/// boundary and suffixed with `"…(+N bytes)"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// Model output cut off by token limits fails with an EOF error, which is
/// worth telling apart from prose in the logs.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Name of a JSON value's type, for error details and logs.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Inclusive date range a query is meant to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl NewsWindow {
    /// Window ending on `today`.
    pub fn ending(today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(NEWS_WINDOW_DAYS),
            to: today,
        }
    }

    /// Window ending today (UTC).
    pub fn current() -> Self {
        Self::ending(Utc::now().date_naive())
    }
}
