use appvars_core::format::to_pretty_json;
use appvars_core::{AppVars, StepOutputs};
use appvars_matrix::{Matrix, detect, meta, spec, validate, version as stamp};

use super::{APPVARS_OUTPUT, context, outputs};

pub fn convert(apps_yaml: &str) -> anyhow::Result<()> {
    let value = StepOutputs::group("Convert application list", || spec::convert(apps_yaml))?;
    outputs().set(APPVARS_OUTPUT, &value.to_string())?;
    Ok(())
}

pub fn validate_input(appvars: &str) -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(appvars).map_err(|e| {
        appvars_core::Error::JsonParse {
            what: "APPVARS".to_owned(),
            source: e,
        }
    })?;
    let apps = spec::validate_input(value)?;
    outputs().set(APPVARS_OUTPUT, &AppVars::list_to_json(&apps))?;
    Ok(())
}

pub fn detect_type(appvars: &str) -> anyhow::Result<()> {
    let apps = AppVars::list_from_json(appvars)?;
    let apps = detect::detect_types(&context(), apps)?;
    outputs().set(APPVARS_OUTPUT, &AppVars::list_to_json(&apps))?;
    Ok(())
}

pub fn app_meta(appvars: &str) -> anyhow::Result<()> {
    let apps = AppVars::list_from_json(appvars)?;
    let apps = StepOutputs::group("Extract application metadata", || {
        meta::get_apps_meta(&context(), apps)
    })?;
    outputs().set(APPVARS_OUTPUT, &AppVars::list_to_json(&apps))?;
    Ok(())
}

pub fn validate_result(appvars: &str) -> anyhow::Result<()> {
    let apps = AppVars::list_from_json(appvars)?;
    validate::validate_result(&apps)?;
    tracing::info!(count = apps.len(), "all application specifications are valid");
    outputs().set(APPVARS_OUTPUT, &AppVars::list_to_json(&apps))?;
    Ok(())
}

pub fn version(appvars: &str) -> anyhow::Result<()> {
    let apps = AppVars::list_from_json(appvars)?;
    let stamped = stamp::stamp(&context(), apps);
    tracing::debug!(
        json = %to_pretty_json(&serde_json::Value::Array(
            stamped.apps.iter().cloned().map(AppVars::into_value).collect()
        )),
        "stamped applications"
    );

    let out = outputs();
    out.set(APPVARS_OUTPUT, &AppVars::list_to_json(&stamped.apps))?;
    out.set("applications-version", &stamped.version)?;
    Ok(())
}

pub fn matrix(appvars: &str) -> anyhow::Result<()> {
    let apps = AppVars::list_from_json(appvars)?;
    let matrix = Matrix::from_apps(apps);
    tracing::info!(apps = ?matrix.application_names, "job matrix created");
    outputs().set(APPVARS_OUTPUT, &matrix.to_json())?;
    Ok(())
}
