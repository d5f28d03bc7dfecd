//! Application list: YAML conversion and input shape checks.

use appvars_core::{AppVars, Error, Result, format};
use serde_json::Value;

const WHAT: &str = "APPVARS";

/// Convert the YAML application list into its JSON value.
pub fn convert(apps_yaml: &str) -> Result<Value> {
    let value = format::parse_yaml("apps", apps_yaml)?;
    tracing::debug!(json = %format::to_pretty_json(&value), "specification as JSON");
    Ok(value)
}

/// Require a non-empty array of records.
pub fn validate_input(value: Value) -> Result<Vec<AppVars>> {
    if !value.is_array() {
        return Err(Error::UnexpectedShape {
            what: WHAT.to_owned(),
            expected: "array",
        });
    }
    tracing::info!("[OK] the specification is an array");

    let apps = AppVars::list_from_value(value, WHAT)?;
    if apps.is_empty() {
        return Err(Error::EmptySpecification {
            what: WHAT.to_owned(),
        });
    }
    tracing::info!("[OK] the specification is not an empty array");
    Ok(apps)
}

/// Convert and validate in one go.
pub fn load(apps_yaml: &str) -> Result<Vec<AppVars>> {
    validate_input(convert(apps_yaml)?)
}
