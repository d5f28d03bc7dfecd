//! Well-known record keys and the key classes the pipeline treats specially.

pub const APPLICATION_NAME: &str = "application-name";
pub const APPLICATION_VERSION: &str = "application-version";
pub const APPLICATION_TYPE: &str = "application-type";
pub const APPLICATION_DESCRIPTION: &str = "application-description";
pub const APPLICATION_BUILD_TIMESTAMP: &str = "application-build-timestamp";
pub const APPLICATION_DEPENDENCIES: &str = "application-dependencies";
pub const APPLICATION_SOURCE_PATH: &str = "application-source-path";
pub const APPLICATION_ADDITIONAL_WATCH_FILES: &str = "application-additional-watch-files";
pub const APPLICATION_SOURCE: &str = "application-source";
pub const APPLICATION_SOURCE_REVISION: &str = "application-source-revision";
pub const APPLICATION_IMAGE_NAME: &str = "application-image-name";
pub const APPLICATION_IMAGE_ID: &str = "application-image-id";
pub const APPLICATION_PREVIOUS_VERSION_TAG: &str = "application-previous-version-tag";
pub const HAS_CHANGES: &str = "has-changes";

pub const CALLER_REPO_DEFAULT_BRANCH: &str = "caller-repo-default-branch";
pub const CALLER_REPO_CALLING_BRANCH: &str = "caller-repo-calling-branch";
pub const CALLER_REPO_IS_ON_DEFAULT_BRANCH: &str = "caller-repo-is-on-default-branch";

pub const DOCKER_IMAGE_REGISTRY: &str = "docker-image-registry";
pub const DOCKER_IMAGE_REPO: &str = "docker-image-repo";
pub const DOCKER_IMAGE_PRUNE_KEEP_MIN_IMAGES: &str = "docker-image-prune-keep-min-images";
pub const DOCKER_IMAGE_PRUNE_KEEP_NUM_DAYS: &str = "docker-image-prune-keep-num-days";

pub const JAVA_VERSION: &str = "java-version";
pub const NODEJS_VERSION: &str = "nodejs-version";
pub const NODEJS_E2E_ENABLED: &str = "nodejs-e2e-enabled";
pub const PYTHON_VERSION: &str = "python-version";

pub const MAVEN_USER_SETTINGS_REPOSITORIES_YML: &str = "maven-user-settings-repositories-yml";
pub const MAVEN_BUILD_PROJECT_DEPLOY_TO_REPOSITORIES_YML: &str =
    "maven-build-project-deploy-to-repositories-yml";
pub const MAVEN_EXTRA_ENVS_FROM_GITHUB_YML: &str = "maven-extra-envs-from-github-yml";
pub const MAVEN_EXTRA_ENVS_FROM_GITHUB: &str = "maven-extra-envs-from-github";

pub const PR_DEPLOY_ADDITIONAL_HELM_VALUES: &str = "pr-deploy-additional-helm-values";
pub const PR_DEPLOY_K8S_APPLICATION_NAME: &str = "pr-deploy-k8s-application-name";
pub const PR_DEPLOY_K8S_NAMESPACE: &str = "pr-deploy-k8s-namespace";
pub const PR_DEPLOY_APP_CONFIG_BRANCH: &str = "pr-deploy-app-config-branch";

pub const GITHUB_DEPENDENCIES_CACHE_ENABLED: &str = "github-dependencies-cache-enabled";
pub const GITHUB_DEPENDENCIES_CACHE_PATH: &str = "github-dependencies-cache-path";
pub const GITHUB_DEPENDENCIES_CACHE_KEY: &str = "github-dependencies-cache-key";
pub const GITHUB_DEPENDENCIES_CACHE_RESTORE_KEYS: &str = "github-dependencies-cache-restore-keys";
pub const GITHUB_DEPENDENCIES_CACHE_PR_BASE_KEY: &str = "github-dependencies-cache-pr-base-key";

pub const GITHUB_REPO_TOKEN: &str = "github-repo-token";

/// Generated cache keys, removed together when caching does not apply.
pub const CACHE_KEYS: &[&str] = &[
    GITHUB_DEPENDENCIES_CACHE_KEY,
    GITHUB_DEPENDENCIES_CACHE_RESTORE_KEYS,
    GITHUB_DEPENDENCIES_CACHE_PR_BASE_KEY,
];

/// Credential-carrying keys: a fresh non-empty input always wins, and the
/// value is masked before anything is logged.
pub const PROTECTED: &[&str] = &[
    "acr-tenant-id",
    "acr-subscription-id",
    "acr-push-service-principal-id",
    "acr-service-principal",
    "app-config-repo-token",
    GITHUB_REPO_TOKEN,
    "jasypt-password",
    MAVEN_EXTRA_ENVS_FROM_GITHUB,
    "pr-deploy-aks-creds-tenant-id",
    "pr-deploy-aks-creds-subscription-id",
    "pr-deploy-aks-creds-service-principal-id",
    "sonarqube-token",
];

/// Allow-list copied into the secret-free snapshot persisted as an artifact.
pub const WITHOUT_SECRETS: &[&str] = &[
    "app-config-repo",
    APPLICATION_BUILD_TIMESTAMP,
    APPLICATION_DESCRIPTION,
    APPLICATION_IMAGE_ID,
    APPLICATION_IMAGE_NAME,
    APPLICATION_NAME,
    APPLICATION_SOURCE,
    APPLICATION_SOURCE_PATH,
    APPLICATION_ADDITIONAL_WATCH_FILES,
    APPLICATION_SOURCE_REVISION,
    APPLICATION_TYPE,
    "application-vendor",
    APPLICATION_VERSION,
    CALLER_REPO_CALLING_BRANCH,
    CALLER_REPO_DEFAULT_BRANCH,
    CALLER_REPO_IS_ON_DEFAULT_BRANCH,
    DOCKER_IMAGE_PRUNE_KEEP_MIN_IMAGES,
    DOCKER_IMAGE_PRUNE_KEEP_NUM_DAYS,
    DOCKER_IMAGE_REGISTRY,
    DOCKER_IMAGE_REPO,
    "github-dependencies-cache-delete-on-pr-close",
    GITHUB_DEPENDENCIES_CACHE_ENABLED,
    GITHUB_DEPENDENCIES_CACHE_KEY,
    GITHUB_DEPENDENCIES_CACHE_PATH,
    GITHUB_DEPENDENCIES_CACHE_PR_BASE_KEY,
    GITHUB_DEPENDENCIES_CACHE_RESTORE_KEYS,
    "java-distribution",
    JAVA_VERSION,
    "maven-build-project-arguments",
    "maven-build-project-command",
    "maven-build-project-deploy-release-artifacts",
    "maven-build-project-deploy-release-deploy-command",
    "maven-build-project-deploy-release-version-command",
    "maven-build-project-deploy-snapshot-artifacts",
    "maven-build-project-deploy-snapshot-deploy-command",
    "maven-build-project-deploy-snapshot-version-command",
    MAVEN_BUILD_PROJECT_DEPLOY_TO_REPOSITORIES_YML,
    "maven-build-project-goals",
    "maven-build-project-version-arguments",
    "maven-build-project-version-command",
    "maven-build-project-version-goals",
    "maven-build-skip-tests",
    "nodejs-build-project-custom-command-final",
    "nodejs-build-project-custom-command-pre-npm-ci",
    "nodejs-build-project-custom-command-pre-npm-run-build",
    "nodejs-build-project-custom-command-pre-npm-run-lint",
    NODEJS_VERSION,
    NODEJS_E2E_ENABLED,
    "nodejs-e2e-backend-json",
    "nodejs-e2e-backend-routes",
    "nodejs-e2e-backend-url",
    "pr-deploy-skip",
    PR_DEPLOY_ADDITIONAL_HELM_VALUES,
    "pr-deploy-aks-cluster-name",
    "pr-deploy-aks-resource-group",
    PR_DEPLOY_APP_CONFIG_BRANCH,
    "pr-deploy-argo-applications-url",
    "pr-deploy-comment-additional-text",
    "pr-deploy-comment-prefix",
    PR_DEPLOY_K8S_APPLICATION_NAME,
    PR_DEPLOY_K8S_NAMESPACE,
    PYTHON_VERSION,
    "spring-boot-build-image-arguments",
    "spring-boot-build-image-command",
    "spring-boot-build-image-pull-images-pre-build-yml",
    "spring-boot-build-image-goals",
    "spring-boot-build-image-version-arguments",
    "spring-boot-build-image-version-command",
    "spring-boot-build-image-version-goals",
    "static-deploy-environments",
    "static-deploy-from-default-branch-only",
    HAS_CHANGES,
    APPLICATION_PREVIOUS_VERSION_TAG,
];

pub fn is_protected(key: &str) -> bool {
    PROTECTED.contains(&key)
}
