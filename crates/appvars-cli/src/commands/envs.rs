use appvars_core::format::to_pretty_json;
use appvars_core::{ActionsMasker, AppVars, StepOutputs};
use appvars_envs::{
    ActionInputs, derive_cache, enrich_docker_maven, enrich_repo, finalize as finalize_record,
    merge_inputs as merge,
};
use secrecy::SecretString;

use super::{APPVARS_OUTPUT, config, context, outputs};

fn emit(app: &AppVars) -> anyhow::Result<()> {
    outputs().set(APPVARS_OUTPUT, &app.to_json())?;
    Ok(())
}

pub fn merge_inputs(app_vars: &str) -> anyhow::Result<()> {
    let app = AppVars::from_json(app_vars)?;
    let app = StepOutputs::group("Merge action inputs", || {
        merge(&context(), app, &ActionInputs::from_env(), &ActionsMasker)
    });
    emit(&app)
}

pub fn repo(appvars: &str, helm_values: Option<&str>) -> anyhow::Result<()> {
    let app = AppVars::from_json(appvars)?;
    let app = enrich_repo(&context(), app, helm_values);
    emit(&app)
}

pub fn docker_maven(appvars: &str, github_repo_token: Option<String>) -> anyhow::Result<()> {
    let app = AppVars::from_json(appvars)?;
    let mut ctx = context();
    if let Some(token) = github_repo_token.filter(|t| !t.trim().is_empty()) {
        ctx.github_token = Some(SecretString::from(token));
    }
    let config = config(&ctx)?;
    let app = enrich_docker_maven(&ctx, &config.prune, app);
    emit(&app)
}

pub fn cache(appvars: &str) -> anyhow::Result<()> {
    let app = AppVars::from_json(appvars)?;
    let ctx = context();
    let config = config(&ctx)?;
    let app = derive_cache(&ctx, &config.cache, app);
    emit(&app)
}

pub fn finalize(appvars: &str) -> anyhow::Result<()> {
    let app = AppVars::from_json(appvars)?;
    let ctx = context();
    let config = config(&ctx)?;
    let done = finalize_record(&ctx, &config.output, app)?;
    tracing::debug!(
        json = %to_pretty_json(&done.without_secrets.clone().into_value()),
        "non-secret envs"
    );

    let out = outputs();
    out.set("json-without-secrets-path", &done.path.display().to_string())?;
    out.set("build-envs-artifact-name", &done.artifact_name)?;
    out.set("json", &done.app.to_json())?;
    tracing::info!(artifact = %done.artifact_name, "build envs finalized");
    Ok(())
}
