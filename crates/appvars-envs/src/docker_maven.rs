//! Image retention defaults and Maven settings fields.

use appvars_core::format::{to_pretty_json, to_yaml, try_parse_yaml};
use appvars_core::{AppVars, ExecutionContext, PruneConfig, keys};
use serde_json::{Map, Value};

/// Placeholder replaced with `owner/repo` in Maven repository YAML.
pub const REPOSITORY_PLACEHOLDER: &str = "{{ github.repository }}";

pub fn enrich_docker_maven(ctx: &ExecutionContext, prune: &PruneConfig, mut app: AppVars) -> AppVars {
    let policy = prune.policy(ctx.is_pull_request());
    if !app.contains(keys::DOCKER_IMAGE_PRUNE_KEEP_MIN_IMAGES) {
        app.set(keys::DOCKER_IMAGE_PRUNE_KEEP_MIN_IMAGES, policy.keep_min_images.as_str());
    }
    if !app.contains(keys::DOCKER_IMAGE_PRUNE_KEEP_NUM_DAYS) {
        app.set(keys::DOCKER_IMAGE_PRUNE_KEEP_NUM_DAYS, policy.keep_num_days.as_str());
    }

    inject_repository(ctx, &mut app, keys::MAVEN_USER_SETTINGS_REPOSITORIES_YML, false);
    inject_repository(ctx, &mut app, keys::MAVEN_BUILD_PROJECT_DEPLOY_TO_REPOSITORIES_YML, true);

    if let Some(spec) = app.text(keys::MAVEN_EXTRA_ENVS_FROM_GITHUB_YML).filter(|s| !s.is_empty()) {
        match try_parse_yaml(&spec) {
            Some(Value::Object(sections)) => {
                let envs = Value::Object(extra_envs(ctx, &sections));
                let pretty = to_pretty_json(&envs);
                tracing::debug!(envs = %pretty, "maven extra envs resolved");
                app.set(keys::MAVEN_EXTRA_ENVS_FROM_GITHUB, envs);
            }
            _ => tracing::warn!("could not parse 'maven-extra-envs-from-github-yml', skipping population"),
        }
    }
    app.remove(keys::MAVEN_EXTRA_ENVS_FROM_GITHUB_YML);

    app
}

/// Substitute the repository placeholder in `key` and canonicalize the YAML.
fn inject_repository(ctx: &ExecutionContext, app: &mut AppVars, key: &str, trim: bool) {
    let Some(yml) = app.get_str(key).filter(|s| !s.is_empty()).map(str::to_owned) else {
        return;
    };
    if ctx.repository.is_empty() {
        tracing::warn!(key, "cannot inject repository as GITHUB_REPOSITORY is unknown");
        return;
    }

    let injected = yml.replace(REPOSITORY_PLACEHOLDER, &ctx.repository);
    let result = match try_parse_yaml(&injected) {
        Some(parsed) => to_yaml(&parsed),
        None => {
            tracing::warn!(key, "value is not valid YAML, keeping the injected text");
            injected
        }
    };
    let result = if trim { result.trim().to_owned() } else { result };
    app.set(key, result);
}

/// Resolve `from-github-context`, `from-secrets` and `from-variables`
/// entries into one env-var map. Missing lookups are skipped with a warning.
fn extra_envs(ctx: &ExecutionContext, sections: &Map<String, Value>) -> Map<String, Value> {
    let mut envs = Map::new();

    let entries = |section: &str| -> Vec<(String, String)> {
        let Some(section) = sections.get(section).and_then(Value::as_object) else {
            return Vec::new();
        };
        section
            .iter()
            .filter_map(|(env, key)| key.as_str().map(|k| (env.clone(), k.to_owned())))
            .collect()
    };

    for (env, key) in entries("from-github-context") {
        match ctx.github_value(&key) {
            Some(value) => {
                tracing::info!(env, "set from github.{key}");
                envs.insert(env, value.into());
            }
            None => tracing::warn!(env, "field '{key}' not found in 'github' context"),
        }
    }
    for (env, key) in entries("from-secrets") {
        match ctx.secret(&key) {
            Some(value) => {
                tracing::info!(env, "set from secrets.{key}");
                envs.insert(env, value.into());
            }
            None => tracing::warn!(env, "secret '{key}' not found in 'secrets' context"),
        }
    }
    for (env, key) in entries("from-variables") {
        match ctx.variable(&key) {
            Some(value) => {
                tracing::info!(env, "set from variables.{key}");
                envs.insert(env, value.into());
            }
            None => tracing::warn!(env, "variable '{key}' not found in 'variables' context"),
        }
    }

    envs
}
