#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git CLI not found")]
    NotFound { source: std::io::Error },

    /// Only the subcommand is kept: arguments may carry credentials.
    #[error("git {subcommand} failed (exit code {code:?})\n{stderr}")]
    CommandFailed {
        subcommand: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}

impl GitError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GitError::CommandFailed { code, .. } => *code,
            GitError::NotFound { .. } | GitError::InvalidUtf8 { .. } => None,
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            GitError::CommandFailed { stderr, .. } => stderr,
            GitError::NotFound { .. } | GitError::InvalidUtf8 { .. } => "",
        }
    }
}
