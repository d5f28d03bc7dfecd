use std::path::Path;

use appvars_envs::{check_required, collect_envs, parse_required_keys};

use super::outputs;

pub fn collect(dir: &Path) -> anyhow::Result<()> {
    let envs = collect_envs(dir)?;
    outputs().set("json", &serde_json::Value::Array(envs).to_string())?;
    Ok(())
}

pub fn require(json: &str, required_keys: &str) -> anyhow::Result<()> {
    if json.trim().is_empty() {
        tracing::info!("build envs not supplied, nothing to check");
        return Ok(());
    }
    let envs: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        appvars_core::Error::JsonParse {
            what: "build envs".to_owned(),
            source: e,
        }
    })?;
    let required = parse_required_keys(required_keys);
    tracing::debug!(keys = ?required, "required build envs");
    check_required(&envs, &required)?;
    Ok(())
}
