//! Checks that required build envs are present and non-empty.

use serde_json::{Map, Value};

use crate::error::EnvsError;

/// Split a newline-separated key list, trimming and dropping blanks and repeats.
pub fn parse_required_keys(raw: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in raw.lines().map(str::trim).filter(|k| !k.is_empty()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_owned());
        }
    }
    keys
}

/// Problems with `required` keys in one entry, each naming `entry_name`.
pub fn entry_problems(entry: &Map<String, Value>, entry_name: &str, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter_map(|key| {
            let found = match entry.get(key) {
                None => {
                    return Some(format!(
                        "Build env '{key}' is required but was not found in '{entry_name}'."
                    ));
                }
                Some(Value::String(s)) if s.trim().is_empty() => "an empty string",
                Some(Value::Null) => "null",
                Some(Value::Object(m)) if m.is_empty() => "an empty object",
                Some(Value::Array(a)) if a.is_empty() => "an empty array",
                Some(_) => return None,
            };
            Some(format!(
                "It is required that build env '{key}' is set to a value; {found} was found in '{entry_name}'."
            ))
        })
        .collect()
}

/// Check one record or an array of records.
///
/// Every problem across every record is reported together.
pub fn check_required(envs: &Value, required: &[String]) -> Result<(), EnvsError> {
    let problems = match envs {
        Value::Object(entry) => entry_problems(entry, "build-envs", required),
        Value::Array(entries) => entries
            .iter()
            .enumerate()
            .flat_map(|(index, entry)| match entry {
                Value::Object(entry) => {
                    let name = entry
                        .get("application-name")
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map_or_else(|| format!("<unknown index: {index}>"), str::to_owned);
                    entry_problems(entry, &format!("build-envs-array ({name})"), required)
                }
                _ => vec![format!("Item {index} of the build envs array must be a JSON object.")],
            })
            .collect(),
        _ => {
            return Err(appvars_core::Error::UnexpectedShape {
                what: "build envs".to_owned(),
                expected: "object or array",
            }
            .into());
        }
    };

    if problems.is_empty() {
        tracing::info!(count = required.len(), "all required build envs are present and valid");
        Ok(())
    } else {
        Err(EnvsError::MissingRequired(problems))
    }
}
