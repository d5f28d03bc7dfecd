use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app_type::ApplicationType;
use crate::keys;

/// One application's configuration, threaded through every stage.
///
/// An open string-keyed map: well-known keys live in [`crate::keys`], any
/// other key flows through the stages untouched. Stages decode the record
/// from its JSON wire form, transform it and serialize it again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppVars(Map<String, Value>);

impl AppVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a single record from its JSON wire form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| crate::Error::JsonParse {
            what: "app vars".to_owned(),
            source: e,
        })?;
        Self::from_value(value, "app vars")
    }

    /// Decode an array of records from its JSON wire form.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        let value: Value = serde_json::from_str(json).map_err(|e| crate::Error::JsonParse {
            what: "APPVARS".to_owned(),
            source: e,
        })?;
        Self::list_from_value(value, "APPVARS")
    }

    pub fn from_value(value: Value, what: &str) -> crate::Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(crate::Error::UnexpectedShape {
                what: what.to_owned(),
                expected: "object",
            }),
        }
    }

    pub fn list_from_value(value: Value, what: &str) -> crate::Result<Vec<Self>> {
        let Value::Array(items) = value else {
            return Err(crate::Error::UnexpectedShape {
                what: what.to_owned(),
                expected: "array",
            });
        };
        items
            .into_iter()
            .map(|item| Self::from_value(item, what))
            .collect()
    }

    /// Compact JSON wire form.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    pub fn list_to_json(records: &[Self]) -> String {
        Value::Array(records.iter().map(|r| Value::Object(r.0.clone())).collect()).to_string()
    }

    /// `application-name`, or an empty string when unset.
    pub fn name(&self) -> &str {
        match self.get_str(keys::APPLICATION_NAME) {
            Some(name) => name,
            None => "",
        }
    }

    /// Name used in logs and file names when the record may be incomplete.
    pub fn display_name(&self) -> &str {
        match self.name() {
            "" => "unknown-app",
            name => name,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Scalar value rendered as text; `None` for absent, null and structured values.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Absent, `null`, or the empty string.
    pub fn is_blank(&self, key: &str) -> bool {
        self.0.get(key).is_none_or(is_blank_value)
    }

    /// Absent or falsy the way a loosely typed record treats it:
    /// `null`, `false`, `0`, or a string that is empty after trimming.
    pub fn is_unset(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => false,
        }
    }

    /// `true` for the boolean `true` or any casing of the string `"true"`.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Set `key` only when it is currently unset. Returns whether it was written.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.is_unset(key) {
            self.set(key, value);
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Parsed `application-type`; `Ok(None)` when not yet set.
    pub fn application_type(&self) -> crate::Result<Option<ApplicationType>> {
        match self.text(keys::APPLICATION_TYPE) {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// Application source path, defaulting to the repository root.
    pub fn source_path(&self) -> String {
        match self.text(keys::APPLICATION_SOURCE_PATH) {
            Some(path) if !path.is_empty() => path,
            _ => "./".to_owned(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the record restricted to `allowed` keys with non-null values.
    pub fn subset(&self, allowed: &[&str]) -> Self {
        let map = allowed
            .iter()
            .filter_map(|key| match self.0.get(*key) {
                None | Some(Value::Null) => None,
                Some(v) => Some(((*key).to_owned(), v.clone())),
            })
            .collect();
        Self(map)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for AppVars {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for AppVars {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render a scalar JSON value as text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AppVars {
        AppVars::from_value(value, "test").unwrap()
    }

    #[test]
    fn zero_is_not_blank_but_is_unset() {
        let r = record(json!({ "n": 0, "s": "", "z": null }));
        assert!(!r.is_blank("n"));
        assert!(r.is_unset("n"));
        assert!(r.is_blank("s"));
        assert!(r.is_blank("z"));
        assert!(r.is_blank("missing"));
    }

    #[test]
    fn truthy_accepts_bool_and_string() {
        let r = record(json!({ "a": true, "b": "TRUE", "c": "yes", "d": false }));
        assert!(r.is_truthy("a"));
        assert!(r.is_truthy("b"));
        assert!(!r.is_truthy("c"));
        assert!(!r.is_truthy("d"));
    }

    #[test]
    fn subset_skips_nulls_and_unknown_keys() {
        let r = record(json!({ "a": "1", "b": null, "secret": "x" }));
        let s = r.subset(&["a", "b", "c"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get_str("a"), Some("1"));
    }

    #[test]
    fn numeric_type_text() {
        let r = record(json!({ "java-version": 17 }));
        assert_eq!(r.text("java-version").as_deref(), Some("17"));
    }
}
