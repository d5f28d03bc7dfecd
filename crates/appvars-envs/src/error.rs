use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EnvsError {
    #[error(transparent)]
    Core(#[from] appvars_core::Error),

    #[error("one or more required build envs are missing or empty:\n{}", .0.join("\n"))]
    MissingRequired(Vec<String>),

    #[error("failed to read build envs directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
