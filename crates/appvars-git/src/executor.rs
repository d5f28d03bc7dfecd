use std::path::PathBuf;

use crate::error::GitError;

/// Abstraction over git CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait GitExecutor: Send + Sync {
    /// Execute a git command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, GitError>;
}

/// Real git CLI executor, optionally pinned to a working directory.
#[derive(Debug, Clone, Default)]
pub struct RealExecutor {
    work_dir: Option<PathBuf>,
}

impl RealExecutor {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
        }
    }
}

impl GitExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, GitError> {
        use std::process::Stdio;

        let mut command = tokio::process::Command::new("git");
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        // stdout and stderr are drained concurrently until exit
        let output = command
            .output()
            .await
            .map_err(|e| GitError::NotFound { source: e })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| GitError::InvalidUtf8 { source: e })
        } else {
            Err(GitError::CommandFailed {
                subcommand: match args.first() {
                    Some(subcommand) => subcommand.clone(),
                    None => String::new(),
                },
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}
