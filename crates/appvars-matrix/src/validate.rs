//! Final validation of the loaded application list.

use appvars_core::{AppVars, ApplicationType, Error, Result, keys};

const REQUIRED: &[&str] = &[
    keys::APPLICATION_NAME,
    keys::APPLICATION_DESCRIPTION,
    keys::APPLICATION_TYPE,
];

/// Every problem found in one record.
pub fn problems(app: &AppVars) -> Vec<String> {
    let mut problems = Vec::new();

    for field in REQUIRED {
        if app.is_unset(field) {
            problems.push(format!("missing or empty property '{field}'"));
        }
    }

    let Some(raw_type) = app.text(keys::APPLICATION_TYPE).filter(|t| !t.trim().is_empty()) else {
        return problems;
    };
    match raw_type.parse::<ApplicationType>() {
        Ok(app_type) => {
            if let Some(key) = app_type.required_version_key() {
                if app.is_unset(key) {
                    problems.push(format!(
                        "property '{key}' is required for application-type '{app_type}'"
                    ));
                }
            }
        }
        Err(e) => problems.push(format!("property 'application-type' is invalid: {e}")),
    }
    problems
}

/// Fail on the first record with problems, reporting all of them.
pub fn validate_result(apps: &[AppVars]) -> Result<()> {
    for app in apps {
        let problems = problems(app);
        if !problems.is_empty() {
            return Err(Error::InvalidApplication {
                app: app.display_name().to_owned(),
                problems,
            });
        }
        tracing::info!(app = %app.name(), "[OK] app is valid");
    }
    tracing::info!("[OK] all required fields were found in the specification");
    Ok(())
}
