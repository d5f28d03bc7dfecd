//! Gathering of per-application build env snapshots.

use std::path::Path;

use serde_json::Value;

use crate::error::EnvsError;

/// Read every `*.json` file directly in `dir`, in file-name order.
///
/// Unreadable or malformed files are skipped with a warning. A missing
/// directory yields an empty list.
pub fn collect_envs(dir: &Path) -> Result<Vec<Value>, EnvsError> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "build envs directory does not exist");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| EnvsError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut files: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut envs = Vec::with_capacity(files.len());
    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read build envs file");
                continue;
            }
        };
        let value = match serde_json::from_str::<Value>(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping malformed build envs file");
                continue;
            }
        };
        envs.push(value);
    }

    tracing::info!(count = envs.len(), "build envs collected");
    Ok(envs)
}
