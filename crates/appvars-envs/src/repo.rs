//! Branch facts and PR-deploy fields.

use appvars_core::format::{to_yaml, try_parse_json, try_parse_yaml};
use appvars_core::{AppVars, ExecutionContext, keys};
use serde_json::Value;

/// Add default-branch facts, canonical Helm values and the Kubernetes
/// application name/namespace to `app`.
pub fn enrich_repo(ctx: &ExecutionContext, mut app: AppVars, helm_input: Option<&str>) -> AppVars {
    let default_branch = match ctx.default_branch() {
        Some(branch) => branch,
        None => "",
    };
    let current_branch = ctx.current_branch();
    let on_default = !default_branch.is_empty() && current_branch == default_branch;

    app.set(keys::CALLER_REPO_DEFAULT_BRANCH, default_branch);
    app.set(keys::CALLER_REPO_IS_ON_DEFAULT_BRANCH, on_default);
    tracing::info!(
        default_branch,
        current_branch,
        on_default,
        "repository branch facts determined"
    );

    match helm_values(&app, helm_input) {
        Some(values) => app.set(keys::PR_DEPLOY_ADDITIONAL_HELM_VALUES, values),
        None => {
            app.remove(keys::PR_DEPLOY_ADDITIONAL_HELM_VALUES);
        }
    }

    let k8s_name = match ctx.pull_request_number() {
        Some(number) => format!("{}-pr-{number}", app.display_name()),
        None => app.display_name().to_owned(),
    };
    if app.set_default(keys::PR_DEPLOY_K8S_APPLICATION_NAME, k8s_name.clone()) {
        tracing::debug!(name = %k8s_name, "k8s application name derived");
    }
    if app.set_default(keys::PR_DEPLOY_K8S_NAMESPACE, k8s_name.clone()) {
        tracing::debug!(namespace = %k8s_name, "k8s namespace derived");
    }

    app
}

/// Helm overrides as canonical YAML text.
///
/// The record value wins over the input. Strings are tried as JSON first,
/// then as YAML; text that is neither is kept verbatim.
fn helm_values(app: &AppVars, helm_input: Option<&str>) -> Option<String> {
    let source = match app.get(keys::PR_DEPLOY_ADDITIONAL_HELM_VALUES) {
        Some(Value::String(s)) => match try_parse_json(s) {
            Some(parsed) => Some(parsed),
            None => Some(Value::String(s.clone())),
        },
        Some(Value::Null) | None => helm_input
            .filter(|s| !s.trim().is_empty())
            .map(|s| Value::String(s.to_owned())),
        Some(other) => Some(other.clone()),
    }?;

    match source {
        Value::String(raw) => match try_parse_yaml(&raw) {
            Some(parsed) => Some(to_yaml(&parsed)),
            None => {
                tracing::warn!("pr-deploy-additional-helm-values is not valid YAML, keeping it as-is");
                Some(raw)
            }
        },
        structured => Some(to_yaml(&structured)),
    }
}
