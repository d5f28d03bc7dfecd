use appvars_core::ActionsMasker;
use appvars_git::{GitClient, resolve_config_branch};

use super::outputs;

pub async fn config_branch(repo: &str, token: &str, branch: &str) -> anyhow::Result<()> {
    let git = GitClient::new();
    let resolved = resolve_config_branch(&git, repo, token, branch, &ActionsMasker).await;
    outputs().set("ref", &resolved)?;
    Ok(())
}
