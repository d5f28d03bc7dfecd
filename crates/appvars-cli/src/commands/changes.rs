use appvars_core::AppVars;
use appvars_git::GitClient;

use super::{APPVARS_OUTPUT, context, outputs};

/// Annotate the application list with change flags.
///
/// A list that cannot be decoded still produces an empty `APPVARS` so the
/// downstream matrix is well formed.
pub async fn detect_changes(appvars: &str) -> anyhow::Result<()> {
    let out = outputs();
    let apps = match AppVars::list_from_json(appvars) {
        Ok(apps) => apps,
        Err(e) => {
            out.set(APPVARS_OUTPUT, "[]")?;
            return Err(e.into());
        }
    };

    let ctx = context();
    let git = GitClient::in_dir(&ctx.workspace);
    let apps = appvars_matrix::detect_changes(&ctx, &git, apps).await;

    out.set(APPVARS_OUTPUT, &AppVars::list_to_json(&apps))?;
    Ok(())
}
