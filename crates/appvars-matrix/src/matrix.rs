//! Reshaping records into the runner's job matrix.

use appvars_core::AppVars;
use serde::Serialize;

/// `strategy.matrix` value fanning one job out per application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    #[serde(rename = "application-name")]
    pub application_names: Vec<String>,
    pub include: Vec<MatrixEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixEntry {
    #[serde(rename = "application-name")]
    pub application_name: String,
    #[serde(rename = "app-vars")]
    pub app_vars: AppVars,
}

impl Matrix {
    pub fn from_apps(apps: Vec<AppVars>) -> Self {
        let application_names = apps.iter().map(|a| a.name().to_owned()).collect();
        let include = apps
            .into_iter()
            .map(|app| MatrixEntry {
                application_name: app.name().to_owned(),
                app_vars: app,
            })
            .collect();
        Self {
            application_names,
            include,
        }
    }

    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize matrix");
                String::from("{}")
            }
        }
    }
}
