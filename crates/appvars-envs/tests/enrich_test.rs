use std::collections::BTreeMap;

use appvars_core::{AppVars, ExecutionContext, PruneConfig};
use appvars_envs::{enrich_docker_maven, enrich_repo};
use secrecy::SecretString;
use serde_json::{Value, json};

fn record(value: Value) -> AppVars {
    AppVars::from_value(value, "test").unwrap()
}

fn push_on(branch: &str) -> ExecutionContext {
    ExecutionContext {
        event_name: "push".to_owned(),
        payload: json!({ "repository": { "default_branch": "main" } }),
        git_ref: format!("refs/heads/{branch}"),
        ref_name: branch.to_owned(),
        repository: "acme/shop".to_owned(),
        ..Default::default()
    }
}

fn pull_request(number: u64) -> ExecutionContext {
    ExecutionContext {
        event_name: "pull_request".to_owned(),
        payload: json!({ "repository": { "default_branch": "main" } }),
        git_ref: format!("refs/pull/{number}/merge"),
        repository: "acme/shop".to_owned(),
        pr_number: Some(number),
        ..Default::default()
    }
}

// ── Repo / PR deploy ──

#[test]
fn default_branch_facts() {
    let app = enrich_repo(&push_on("main"), record(json!({ "application-name": "shop" })), None);
    assert_eq!(app.get_str("caller-repo-default-branch"), Some("main"));
    assert_eq!(app.get("caller-repo-is-on-default-branch"), Some(&json!(true)));

    let app = enrich_repo(&push_on("feature"), record(json!({ "application-name": "shop" })), None);
    assert_eq!(app.get("caller-repo-is-on-default-branch"), Some(&json!(false)));
}

#[test]
fn unknown_default_branch_is_never_current() {
    let ctx = ExecutionContext {
        event_name: "push".to_owned(),
        git_ref: String::new(),
        ..Default::default()
    };
    let app = enrich_repo(&ctx, AppVars::new(), None);
    assert_eq!(app.get_str("caller-repo-default-branch"), Some(""));
    assert_eq!(app.get("caller-repo-is-on-default-branch"), Some(&json!(false)));
}

#[test]
fn k8s_names_for_pull_request() {
    let app = enrich_repo(&pull_request(12), record(json!({ "application-name": "shop" })), None);
    assert_eq!(app.get_str("pr-deploy-k8s-application-name"), Some("shop-pr-12"));
    assert_eq!(app.get_str("pr-deploy-k8s-namespace"), Some("shop-pr-12"));
}

#[test]
fn explicit_k8s_names_are_kept() {
    let app = enrich_repo(
        &pull_request(12),
        record(json!({ "application-name": "shop", "pr-deploy-k8s-namespace": "team-ns" })),
        None,
    );
    assert_eq!(app.get_str("pr-deploy-k8s-application-name"), Some("shop-pr-12"));
    assert_eq!(app.get_str("pr-deploy-k8s-namespace"), Some("team-ns"));
}

#[test]
fn helm_values_json_string_becomes_yaml() {
    let app = enrich_repo(
        &push_on("main"),
        record(json!({ "pr-deploy-additional-helm-values": "{\"replicas\": 2}" })),
        None,
    );
    assert_eq!(app.get_str("pr-deploy-additional-helm-values"), Some("replicas: 2\n"));
}

#[test]
fn helm_values_object_becomes_yaml() {
    let app = enrich_repo(
        &push_on("main"),
        record(json!({ "pr-deploy-additional-helm-values": { "image": { "tag": "x" } } })),
        None,
    );
    assert_eq!(
        app.get_str("pr-deploy-additional-helm-values"),
        Some("image:\n  tag: x\n")
    );
}

#[test]
fn helm_values_from_input_when_record_has_none() {
    let app = enrich_repo(&push_on("main"), AppVars::new(), Some("a: 1\nb: two\n"));
    assert_eq!(app.get_str("pr-deploy-additional-helm-values"), Some("a: 1\nb: two\n"));
}

#[test]
fn invalid_helm_yaml_is_kept_verbatim() {
    let raw = "a: [1, 2";
    let app = enrich_repo(&push_on("main"), AppVars::new(), Some(raw));
    assert_eq!(app.get_str("pr-deploy-additional-helm-values"), Some(raw));
}

#[test]
fn absent_helm_values_are_removed() {
    let app = enrich_repo(
        &push_on("main"),
        record(json!({ "pr-deploy-additional-helm-values": null })),
        None,
    );
    assert!(!app.contains("pr-deploy-additional-helm-values"));
}

// ── Docker / Maven ──

#[test]
fn prune_defaults_by_event() {
    let prune = PruneConfig::default();

    let pr = enrich_docker_maven(&pull_request(3), &prune, AppVars::new());
    assert_eq!(pr.get_str("docker-image-prune-keep-min-images"), Some("5"));
    assert_eq!(pr.get_str("docker-image-prune-keep-num-days"), Some("0"));

    let push = enrich_docker_maven(&push_on("main"), &prune, AppVars::new());
    assert_eq!(push.get_str("docker-image-prune-keep-min-images"), Some("10"));
    assert_eq!(push.get_str("docker-image-prune-keep-num-days"), Some("180"));
}

#[test]
fn explicit_zero_prune_value_is_kept() {
    let app = enrich_docker_maven(
        &push_on("main"),
        &PruneConfig::default(),
        record(json!({ "docker-image-prune-keep-num-days": 0 })),
    );
    assert_eq!(app.get("docker-image-prune-keep-num-days"), Some(&json!(0)));
    assert_eq!(app.get_str("docker-image-prune-keep-min-images"), Some("10"));
}

#[test]
fn repository_placeholder_is_injected() {
    let app = enrich_docker_maven(
        &push_on("main"),
        &PruneConfig::default(),
        record(json!({
            "maven-user-settings-repositories-yml":
                "repositories:\n  - id: github\n    url: https://maven.pkg.github.com/{{ github.repository }}\n",
            "maven-build-project-deploy-to-repositories-yml":
                "release:\n  id: github\n  url: https://maven.pkg.github.com/{{ github.repository }}\n"
        })),
    );

    assert_eq!(
        app.get_str("maven-user-settings-repositories-yml"),
        Some("repositories:\n- id: github\n  url: https://maven.pkg.github.com/acme/shop\n")
    );
    assert_eq!(
        app.get_str("maven-build-project-deploy-to-repositories-yml"),
        Some("release:\n  id: github\n  url: https://maven.pkg.github.com/acme/shop")
    );
}

#[test]
fn unknown_repository_keeps_settings() {
    let ctx = ExecutionContext {
        event_name: "push".to_owned(),
        ..Default::default()
    };
    let yml = "url: {{ github.repository }}";
    let app = enrich_docker_maven(
        &ctx,
        &PruneConfig::default(),
        record(json!({ "maven-user-settings-repositories-yml": yml })),
    );
    assert_eq!(app.get_str("maven-user-settings-repositories-yml"), Some(yml));
}

#[test]
fn extra_envs_are_resolved_from_contexts() {
    let mut secrets = BTreeMap::new();
    secrets.insert("NEXUS_USER".to_owned(), SecretString::from("nexus"));
    let mut vars = BTreeMap::new();
    vars.insert("REGION".to_owned(), "westeurope".to_owned());
    let ctx = ExecutionContext {
        github: json!({ "actor": "octocat" }),
        github_token: Some(SecretString::from("ghs_token")),
        secrets,
        vars,
        ..push_on("main")
    };
    let spec = "\
from-github-context:
  GH_ACTOR: actor
  GH_TOKEN: token
  GH_MISSING: nope
from-secrets:
  MVN_USER: NEXUS_USER
  MVN_PASS: NEXUS_PASSWORD
from-variables:
  AZ_REGION: REGION
";

    let app = enrich_docker_maven(
        &ctx,
        &PruneConfig::default(),
        record(json!({ "maven-extra-envs-from-github-yml": spec })),
    );

    assert!(!app.contains("maven-extra-envs-from-github-yml"));
    assert_eq!(
        app.get("maven-extra-envs-from-github"),
        Some(&json!({
            "GH_ACTOR": "octocat",
            "GH_TOKEN": "ghs_token",
            "MVN_USER": "nexus",
            "AZ_REGION": "westeurope"
        }))
    );
}

#[test]
fn unparsable_extra_envs_are_dropped() {
    let app = enrich_docker_maven(
        &push_on("main"),
        &PruneConfig::default(),
        record(json!({ "maven-extra-envs-from-github-yml": "from-secrets: [a" })),
    );
    assert!(!app.contains("maven-extra-envs-from-github-yml"));
    assert!(!app.contains("maven-extra-envs-from-github"));
}
