//! Generated identifiers and the secret-free snapshot.

use std::path::{Path, PathBuf};

use appvars_core::format::to_pretty_json;
use appvars_core::{AppVars, ExecutionContext, OutputConfig, keys};

use crate::error::EnvsError;

#[derive(Debug, Clone)]
pub struct Finalized {
    /// The full record, secrets included.
    pub app: AppVars,
    pub without_secrets: AppVars,
    /// Where `without_secrets` was written.
    pub path: PathBuf,
    pub artifact_name: String,
}

/// Fill in the generated identifiers of `app`.
pub fn generate_ids(ctx: &ExecutionContext, mut app: AppVars) -> AppVars {
    let part = |key| app.text(key).filter(|s| !s.is_empty());
    match (
        part(keys::DOCKER_IMAGE_REGISTRY),
        part(keys::DOCKER_IMAGE_REPO),
        part(keys::APPLICATION_IMAGE_NAME),
    ) {
        (Some(registry), Some(repo), Some(image)) => {
            app.set(keys::APPLICATION_IMAGE_ID, format!("{registry}/{repo}/{image}"));
        }
        _ => tracing::debug!("registry, repo or image name missing, no application-image-id"),
    }

    if !ctx.repository.is_empty() {
        let server = ctx.server_url.trim_end_matches('/');
        app.set(keys::APPLICATION_SOURCE, format!("{server}/{}", ctx.repository));
    }
    if !ctx.sha.is_empty() {
        app.set(keys::APPLICATION_SOURCE_REVISION, ctx.sha.as_str());
    }
    if !ctx.ref_name.is_empty() {
        app.set(keys::CALLER_REPO_CALLING_BRANCH, ctx.ref_name.as_str());
    }
    app
}

/// Name of the artifact the snapshot is uploaded as.
pub fn artifact_name(app: &AppVars) -> String {
    let version = match app.text(keys::APPLICATION_VERSION) {
        Some(version) if !version.is_empty() => version,
        _ => "no-version".to_owned(),
    };
    format!("build-envs-{version}-{}", app.display_name())
}

/// Generate identifiers and write the secret-free view to
/// `<workspace>/<output dir>/<name>.json`.
pub fn finalize(
    ctx: &ExecutionContext,
    output: &OutputConfig,
    app: AppVars,
) -> Result<Finalized, EnvsError> {
    let app = generate_ids(ctx, app);
    let without_secrets = app.subset(keys::WITHOUT_SECRETS);

    let dir = ctx.resolve(&output.dir);
    let path = dir.join(format!("{}.json", app.display_name()));
    write_snapshot(&dir, &path, &without_secrets)?;
    tracing::info!(
        keys = without_secrets.len(),
        path = %path.display(),
        "non-secret envs saved"
    );

    let artifact_name = artifact_name(&app);
    Ok(Finalized {
        app,
        without_secrets,
        path,
        artifact_name,
    })
}

fn write_snapshot(dir: &Path, path: &Path, record: &AppVars) -> Result<(), EnvsError> {
    let write_err = |p: &Path, e| appvars_core::Error::Write {
        path: p.to_path_buf(),
        source: e,
    };
    std::fs::create_dir_all(dir).map_err(|e| write_err(dir, e))?;
    let json = to_pretty_json(&record.clone().into_value());
    std::fs::write(path, json).map_err(|e| write_err(path, e))?;
    Ok(())
}
