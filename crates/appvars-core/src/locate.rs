//! Resolution of an application's source path to files on disk.

use std::path::{Path, PathBuf};

/// Resolve `source_path` to a manifest file.
///
/// A path naming a file is used as-is. A directory is joined with
/// `manifest`. Anything else is an error naming the manifest expected.
pub fn locate_manifest(source_path: &Path, manifest: &'static str) -> crate::Result<PathBuf> {
    if source_path.is_file() {
        return Ok(source_path.to_path_buf());
    }
    if source_path.is_dir() {
        let candidate = source_path.join(manifest);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(crate::Error::ManifestNotFound {
        path: source_path.to_path_buf(),
        manifest,
    })
}

/// Directory a lockfile is searched in.
///
/// The parent of a file, the directory itself, or `workspace` when the
/// path does not exist.
pub fn search_dir(workspace: &Path, source_path: &str) -> PathBuf {
    let full = workspace.join(source_path);
    if full.is_file() {
        if let Some(parent) = full.parent() {
            return parent.to_path_buf();
        }
    }
    if full.is_dir() {
        return full;
    }
    tracing::warn!(
        path = %full.display(),
        "application-source-path not found, searching the workspace root"
    );
    workspace.to_path_buf()
}
