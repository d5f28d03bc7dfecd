//! Merging of action inputs into an application record.

use appvars_core::{AppVars, ExecutionContext, SecretMasker, keys};
use secrecy::ExposeSecret;

/// Record key and the action input it is read from.
pub const INPUTS: &[(&str, &str)] = &[
    (keys::PR_DEPLOY_ADDITIONAL_HELM_VALUES, "pr-deploy-additional-helm-values"),
    (keys::MAVEN_USER_SETTINGS_REPOSITORIES_YML, "maven-user-settings-repositories-yml"),
    (keys::MAVEN_EXTRA_ENVS_FROM_GITHUB_YML, "maven-extra-envs-from-github-yml"),
    (
        keys::MAVEN_BUILD_PROJECT_DEPLOY_TO_REPOSITORIES_YML,
        "maven-build-project-deploy-to-repositories-yml",
    ),
    (keys::APPLICATION_NAME, "application-name"),
    (keys::APPLICATION_VERSION, "application-version"),
    (keys::APPLICATION_TYPE, "application-type"),
    (keys::APPLICATION_SOURCE_PATH, "application-source-path"),
    ("application-vendor", "application-vendor"),
    (keys::DOCKER_IMAGE_REGISTRY, "docker-image-registry"),
    (keys::DOCKER_IMAGE_REPO, "docker-image-repo"),
    (keys::APPLICATION_IMAGE_NAME, "application-image-name"),
    (keys::DOCKER_IMAGE_PRUNE_KEEP_MIN_IMAGES, "docker-image-prune-keep-min-images"),
    (keys::DOCKER_IMAGE_PRUNE_KEEP_NUM_DAYS, "docker-image-prune-keep-num-days"),
    ("acr-username", "acr-username"),
    ("acr-password", "acr-password"),
    ("acr-service-principal", "acr-service-principal"),
    ("sonarqube-token", "sonarqube-token"),
    ("jasypt-password", "jasypt-password"),
    (keys::JAVA_VERSION, "java-version"),
    ("java-distribution", "java-distribution"),
    (keys::NODEJS_VERSION, "nodejs-version"),
    (keys::GITHUB_REPO_TOKEN, "github-repo-token"),
    ("npmjs-token", "npmjs-token"),
    ("app-config-repo", "app-config-repo"),
    ("app-config-repo-token", "app-config-repo-token"),
    ("static-deploy-environments", "static-deploy-environments"),
    ("static-deploy-from-default-branch-only", "static-deploy-from-default-branch-only"),
    (keys::PR_DEPLOY_APP_CONFIG_BRANCH, "config-branch-ref"),
    ("pr-deploy-aks-cluster-name", "pr-deploy-aks-cluster-name"),
    ("pr-deploy-aks-resource-group", "pr-deploy-aks-resource-group"),
    ("pr-deploy-aks-creds-tenant-id", "pr-deploy-aks-creds-tenant-id"),
    ("pr-deploy-aks-creds-subscription-id", "pr-deploy-aks-creds-subscription-id"),
    (
        "pr-deploy-aks-creds-service-principal-id",
        "pr-deploy-aks-creds-service-principal-id",
    ),
    ("pr-deploy-argo-applications-url", "pr-deploy-argo-applications-url"),
    ("pr-deploy-comment-prefix", "pr-deploy-comment-prefix"),
    (keys::GITHUB_DEPENDENCIES_CACHE_ENABLED, "github-dependencies-cache-enabled"),
    (
        "github-dependencies-cache-delete-on-pr-close",
        "github-dependencies-cache-delete-on-pr-close",
    ),
    (keys::GITHUB_DEPENDENCIES_CACHE_PATH, "github-dependencies-cache-path"),
    ("config-branch-ref", "config-branch-ref"),
];

/// Environment variable the runner exposes an action input under.
pub fn input_env_var(input: &str) -> String {
    format!("INPUT_{}", input.to_uppercase().replace('-', "_"))
}

/// Trimmed action input values keyed by record key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInputs {
    values: Vec<(&'static str, String)>,
}

impl ActionInputs {
    /// Read every known input through `lookup`, called with the input name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let values = INPUTS
            .iter()
            .map(|(key, input)| {
                let value = match lookup(input) {
                    Some(value) => value.trim().to_owned(),
                    None => String::new(),
                };
                (*key, value)
            })
            .collect();
        Self { values }
    }

    /// Inputs of the running action, read from `INPUT_*` variables.
    pub fn from_env() -> Self {
        // arch-lint: allow(no-silent-result-drop) reason="unset input reads as empty"
        Self::from_lookup(|input| std::env::var(input_env_var(input)).ok())
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Merge `inputs` into `app`.
///
/// A non-empty protected input always replaces the record value. Any other
/// input only fills a key that is absent, `null` or empty. Protected inputs
/// and the whole secrets context are masked first.
pub fn merge_inputs(
    ctx: &ExecutionContext,
    mut app: AppVars,
    inputs: &ActionInputs,
    masker: &dyn SecretMasker,
) -> AppVars {
    for secret in ctx.secrets.values() {
        let secret = secret.expose_secret();
        if !secret.is_empty() {
            masker.mask(secret);
        }
    }

    for (key, value) in inputs.iter().filter(|(_, v)| !v.is_empty()) {
        if keys::is_protected(key) {
            masker.mask(value);
            tracing::debug!(key, "protected input overrides record value");
            app.set(key, value);
        } else if app.is_blank(key) {
            tracing::debug!(key, "input fills unset record value");
            app.set(key, value);
        }
    }

    tracing::info!(app = %app.display_name(), keys = app.len(), "inputs merged");
    app
}
