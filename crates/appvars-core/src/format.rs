//! Lenient JSON/YAML helpers for secondary, optional fields.
//!
//! The primary record is always parsed strictly (see [`crate::AppVars`]);
//! these helpers are for values where a parse failure degrades to a
//! warning and a fallback instead of failing the stage.

use serde_json::Value;

/// Parse JSON, returning `None` (with a warning) on failure or empty input.
pub fn try_parse_json(input: &str) -> Option<Value> {
    if input.is_empty() {
        return None;
    }
    match serde_json::from_str(input) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "value is not JSON");
            None
        }
    }
}

/// Parse YAML into a JSON value.
///
/// Returns `None` for empty input, a document that is `null`, or a parse
/// failure (logged as a warning).
pub fn try_parse_yaml(input: &str) -> Option<Value> {
    if input.is_empty() {
        return None;
    }
    match serde_yaml::from_str::<Value>(input) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse YAML");
            tracing::debug!(input, "invalid YAML string");
            None
        }
    }
}

/// Strict YAML parse used for the application list.
pub fn parse_yaml(what: &str, input: &str) -> crate::Result<Value> {
    serde_yaml::from_str(input).map_err(|e| crate::Error::YamlParse {
        what: what.to_owned(),
        source: e,
    })
}

/// Canonical YAML rendering: block style, no line wrapping.
pub fn to_yaml(value: &Value) -> String {
    match serde_yaml::to_string(value) {
        Ok(yaml) => yaml,
        Err(e) => {
            tracing::warn!(error = %e, "failed to stringify value to YAML");
            String::new()
        }
    }
}

/// Pretty JSON for log output.
pub fn to_pretty_json(value: &Value) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to stringify value to JSON");
            value.to_string()
        }
    }
}
