use appvars_core::NULL_SHA;

use crate::error::GitError;
use crate::executor::{GitExecutor, RealExecutor};

/// Git operations client, parameterized over the executor for testability.
pub struct GitClient<E: GitExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::default(),
        }
    }

    /// Client running git inside `dir`.
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            executor: RealExecutor::in_dir(dir),
        }
    }
}

impl Default for GitClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GitExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Changes ──

    /// Files touched between `base` and `head`.
    ///
    /// A null `head` (ref deletion) touches nothing; a null `base` (first
    /// push of a ref) lists every file of `head`.
    pub async fn changed_files(&self, base: &str, head: &str) -> Result<Vec<String>, GitError> {
        if head == NULL_SHA {
            tracing::info!("head SHA is the null SHA (e.g. branch deletion), no files changed");
            return Ok(Vec::new());
        }

        let output = if base == NULL_SHA {
            tracing::info!(head, "base SHA is the null SHA (initial push), listing all files");
            self.executor
                .exec(&args(["ls-tree", "-r", "--name-only", head]))
                .await?
        } else {
            tracing::info!(base, head, "comparing commits");
            self.executor
                .exec(&args(["diff", "--name-only", base, head]))
                .await?
        };

        let files = lines(&output);
        tracing::info!(count = files.len(), "detected changed file(s)");
        tracing::debug!(files = ?files, "changed files");
        Ok(files)
    }

    // ── Tags ──

    /// Most recent tag reachable from `sha`, any format.
    ///
    /// A repository without reachable tags yields `Ok(None)`.
    pub async fn latest_reachable_tag(&self, sha: &str) -> Result<Option<String>, GitError> {
        tracing::info!(sha, "looking up most recent reachable tag");
        match self
            .executor
            .exec(&args(["describe", "--tags", "--abbrev=0", sha]))
            .await
        {
            Ok(out) => {
                let tag = out.trim();
                if tag.is_empty() {
                    Ok(None)
                } else {
                    tracing::debug!(tag, "found latest reachable tag");
                    Ok(Some(tag.to_owned()))
                }
            }
            Err(e) if is_no_tag(&e) => {
                tracing::info!(sha, "no tag reachable from commit");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // ── Remote ──

    /// Whether `branch` exists on the remote `url`.
    pub async fn remote_branch_exists(&self, url: &str, branch: &str) -> Result<bool, GitError> {
        match self
            .executor
            .exec(&args(["ls-remote", "--exit-code", "--heads", url, branch]))
            .await
        {
            Ok(out) => Ok(!out.trim().is_empty()),
            // ls-remote --exit-code exits 2 when no matching ref exists
            Err(e) if e.exit_code() == Some(2) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn is_no_tag(err: &GitError) -> bool {
    let stderr = err.stderr();
    stderr.contains("No names found") || stderr.contains("no tag found")
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}
