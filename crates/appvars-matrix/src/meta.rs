//! Metadata extraction from each ecosystem's native manifest.

use std::path::{Path, PathBuf};

use appvars_core::{AppVars, ApplicationType, Error, ExecutionContext, Result, keys, locate};

use crate::dependency::{self, Dependency};

/// Facts read from a manifest, before they are merged into the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppMetadata {
    pub description: Option<String>,
    pub java_version: Option<String>,
    pub nodejs_version: Option<String>,
    pub python_version: Option<String>,
    pub e2e_enabled: bool,
    pub dependencies: Vec<Dependency>,
}

/// Read the manifest at `manifest` for an application of `app_type`.
pub fn extract(manifest: &Path, app_type: ApplicationType) -> Result<AppMetadata> {
    let content = std::fs::read_to_string(manifest).map_err(|e| Error::ManifestRead {
        path: manifest.to_path_buf(),
        source: e,
    })?;
    if content.is_empty() {
        return Err(Error::ManifestEmpty {
            path: manifest.to_path_buf(),
        });
    }

    match app_type {
        ApplicationType::SpringBoot | ApplicationType::MavenLibrary => parse_pom(manifest, &content),
        ApplicationType::Vue => {
            let mut meta = parse_package_json(manifest, &content)?;
            meta.e2e_enabled = manifest
                .parent()
                .is_some_and(|dir| dir.join("Dockerfile.playwright").is_file());
            Ok(meta)
        }
        ApplicationType::Python => parse_pyproject(manifest, &content),
    }
}

fn parse_pom(path: &Path, content: &str) -> Result<AppMetadata> {
    let doc = roxmltree::Document::parse(content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let project = doc.root_element();

    let description = child_text(project, "description");
    let java_version = project
        .children()
        .find(|n| is_element_named(n, "properties"))
        .and_then(|props| child_text(props, "java.version"));

    if java_version.is_none() {
        return Err(Error::MissingJavaVersion {
            path: path.to_path_buf(),
        });
    }

    Ok(AppMetadata {
        description,
        java_version,
        ..Default::default()
    })
}

/// Tag match ignoring the POM namespace.
fn is_element_named(node: &roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|n| is_element_named(n, name))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

fn parse_package_json(path: &Path, content: &str) -> Result<AppMetadata> {
    let json: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    Ok(AppMetadata {
        description: non_empty(json.get("description").and_then(|v| v.as_str())),
        nodejs_version: non_empty(json.pointer("/engines/node").and_then(|v| v.as_str())),
        ..Default::default()
    })
}

fn parse_pyproject(path: &Path, content: &str) -> Result<AppMetadata> {
    let doc: toml::Table = toml::from_str(content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let project = doc.get("project").and_then(toml::Value::as_table);
    let field = |key: &str| {
        project
            .and_then(|p| p.get(key))
            .and_then(toml::Value::as_str)
    };

    let requirements: Vec<&str> = match project
        .and_then(|p| p.get("dependencies"))
        .and_then(toml::Value::as_array)
    {
        Some(deps) => deps.iter().filter_map(toml::Value::as_str).collect(),
        None => Vec::new(),
    };

    Ok(AppMetadata {
        description: non_empty(field("description")),
        python_version: non_empty(field("requires-python")),
        dependencies: dependency::parse_all(requirements),
        ..Default::default()
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).map(str::to_owned)
}

/// Merge extracted metadata into the record.
///
/// Description and runtime versions never override values already set;
/// the dependency list and the e2e flag always reflect the manifest.
pub fn apply(mut app: AppVars, meta: AppMetadata) -> AppVars {
    let name = app.display_name().to_owned();
    let fields = [
        (keys::APPLICATION_DESCRIPTION, meta.description),
        (keys::JAVA_VERSION, meta.java_version),
        (keys::NODEJS_VERSION, meta.nodejs_version),
        (keys::PYTHON_VERSION, meta.python_version),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            if app.set_default(key, value.as_str()) {
                tracing::info!(app = %name, key, value, "set from manifest");
            }
        }
    }

    if !meta.dependencies.is_empty() {
        tracing::info!(app = %name, count = meta.dependencies.len(), "setting application-dependencies");
        let deps = meta
            .dependencies
            .iter()
            .map(|d| {
                serde_json::json!({ "name": d.name, "operator": d.operator, "version": d.version })
            })
            .collect::<Vec<_>>();
        app.set(keys::APPLICATION_DEPENDENCIES, deps);
    }

    tracing::info!(app = %name, enabled = meta.e2e_enabled, "setting nodejs-e2e-enabled");
    app.set(keys::NODEJS_E2E_ENABLED, meta.e2e_enabled);
    app
}

/// Manifest path for a record, resolved against the workspace.
pub fn manifest_for(ctx: &ExecutionContext, app: &AppVars) -> Result<(PathBuf, ApplicationType)> {
    let app_type = match app.application_type() {
        Ok(Some(app_type)) => app_type,
        Ok(None) => {
            return Err(Error::MissingApplicationType {
                app: app.display_name().to_owned(),
            });
        }
        Err(e) => {
            return Err(Error::InvalidApplication {
                app: app.display_name().to_owned(),
                problems: vec![e.to_string()],
            });
        }
    };
    let source_path = ctx.resolve(app.source_path());
    if !source_path.exists() {
        return Err(Error::SourcePathMissing { path: source_path });
    }
    let manifest = locate::locate_manifest(&source_path, app_type.manifest_file())?;
    Ok((manifest, app_type))
}

/// Extract and merge metadata for one record.
///
/// A source path without the expected manifest leaves the record as it is;
/// the result validation reports whatever is still missing.
pub fn get_app_meta(ctx: &ExecutionContext, mut app: AppVars) -> Result<AppVars> {
    if app.is_unset(keys::APPLICATION_SOURCE_PATH) {
        tracing::info!(app = %app.display_name(), "'application-source-path' not defined, using default");
        app.set(keys::APPLICATION_SOURCE_PATH, "./");
    }
    let (manifest, app_type) = match manifest_for(ctx, &app) {
        Ok(found) => found,
        Err(Error::ManifestNotFound { path, manifest }) => {
            tracing::warn!(
                app = %app.display_name(),
                path = %path.display(),
                manifest,
                "manifest not found, skipping metadata extraction"
            );
            return Ok(apply(app, AppMetadata::default()));
        }
        Err(e) => return Err(e),
    };
    tracing::info!(app = %app.display_name(), manifest = %manifest.display(), "reading manifest");
    let meta = extract(&manifest, app_type)?;
    Ok(apply(app, meta))
}

pub fn get_apps_meta(ctx: &ExecutionContext, apps: Vec<AppVars>) -> Result<Vec<AppVars>> {
    if apps.is_empty() {
        return Err(Error::EmptySpecification {
            what: "APPVARS".to_owned(),
        });
    }
    apps.into_iter().map(|app| get_app_meta(ctx, app)).collect()
}
