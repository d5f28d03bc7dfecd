//! Application type inference from marker files.

use std::path::Path;

use appvars_core::{AppVars, ApplicationType, Error, ExecutionContext, Result, keys};

/// Marker files checked in order; the first one present decides the type.
const MARKERS: &[(&str, ApplicationType)] = &[
    ("pom.xml", ApplicationType::SpringBoot),
    ("package.json", ApplicationType::Vue),
    ("requirements.txt", ApplicationType::Python),
    ("pyproject.toml", ApplicationType::Python),
];

/// Find the first known marker file in `dir`.
pub fn marker_type(dir: &Path) -> Option<ApplicationType> {
    MARKERS.iter().find_map(|(marker, app_type)| {
        dir.join(marker).is_file().then(|| {
            tracing::debug!(marker, %app_type, "marker file found");
            *app_type
        })
    })
}

/// Fill in `application-type` when the record has none.
pub fn detect_type(ctx: &ExecutionContext, mut app: AppVars) -> Result<AppVars> {
    if app.text(keys::APPLICATION_TYPE).is_some_and(|t| !t.trim().is_empty()) {
        return Ok(app);
    }

    if app.is_unset(keys::APPLICATION_SOURCE_PATH) {
        app.set(keys::APPLICATION_SOURCE_PATH, "./");
    }
    let source_path = ctx.resolve(app.source_path());
    if !source_path.exists() {
        return Err(Error::SourcePathMissing { path: source_path });
    }

    let dir = if source_path.is_file() {
        match source_path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => ctx.workspace.clone(),
        }
    } else {
        source_path
    };

    let app_type = marker_type(&dir).ok_or_else(|| Error::UnresolvableType { dir: dir.clone() })?;
    tracing::info!(app = %app.display_name(), %app_type, "detected application-type");
    app.set(keys::APPLICATION_TYPE, app_type.as_str());
    Ok(app)
}

pub fn detect_types(ctx: &ExecutionContext, apps: Vec<AppVars>) -> Result<Vec<AppVars>> {
    apps.into_iter().map(|app| detect_type(ctx, app)).collect()
}
