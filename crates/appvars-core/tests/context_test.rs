use appvars_core::{EventKind, ExecutionContext};
use secrecy::SecretString;
use serde_json::json;

fn push_context() -> ExecutionContext {
    ExecutionContext {
        event_name: "push".to_owned(),
        payload: json!({
            "before": "aaa",
            "after": "bbb",
            "repository": { "default_branch": "main" }
        }),
        git_ref: "refs/heads/feature/x".to_owned(),
        ..Default::default()
    }
}

#[test]
fn push_range_uses_before_and_after() {
    let ctx = push_context();
    let range = ctx.commit_range().unwrap();
    assert_eq!(range.base, "aaa");
    assert_eq!(range.head, "bbb");
}

#[test]
fn pull_request_range_uses_base_and_head() {
    let ctx = ExecutionContext {
        event_name: "pull_request".to_owned(),
        payload: json!({
            "action": "synchronize",
            "pull_request": { "base": { "sha": "b1" }, "head": { "sha": "h1" } }
        }),
        pr_number: Some(7),
        ..Default::default()
    };
    let range = ctx.commit_range().unwrap();
    assert_eq!((range.base.as_str(), range.head.as_str()), ("b1", "h1"));
    assert_eq!(ctx.action(), Some("synchronize"));
    assert_eq!(ctx.pull_request_number(), Some(7));
}

#[test]
fn dispatch_has_no_range() {
    let ctx = ExecutionContext {
        event_name: "workflow_dispatch".to_owned(),
        pr_number: Some(3),
        ..Default::default()
    };
    assert_eq!(ctx.event(), EventKind::WorkflowDispatch);
    assert!(ctx.commit_range().is_none());
    assert_eq!(ctx.pull_request_number(), None);
}

#[test]
fn branches_come_from_ref_and_payload() {
    let ctx = push_context();
    assert_eq!(ctx.current_branch(), "feature/x");
    assert_eq!(ctx.default_branch(), Some("main"));
}

#[test]
fn github_token_lookup_is_special_cased() {
    let ctx = ExecutionContext {
        github: json!({ "actor": "octocat", "run_number": 12 }),
        github_token: Some(SecretString::from("ghs_abc")),
        ..Default::default()
    };
    assert_eq!(ctx.github_value("token").as_deref(), Some("ghs_abc"));
    assert_eq!(ctx.github_value("actor").as_deref(), Some("octocat"));
    assert_eq!(ctx.github_value("run_number").as_deref(), Some("12"));
    assert!(ctx.github_value("missing").is_none());
}

#[test]
fn debug_output_redacts_secrets() {
    let mut ctx = ExecutionContext::default();
    ctx.secrets
        .insert("NPM_TOKEN".to_owned(), SecretString::from("super-secret"));
    let debug = format!("{ctx:?}");
    assert!(!debug.contains("super-secret"));
    assert_eq!(ctx.secret("NPM_TOKEN"), Some("super-secret"));
}

#[test]
fn flatten_context_keeps_scalars() {
    let map = appvars_core::context::flatten_context(json!({
        "A": "x",
        "B": 1,
        "C": { "nested": true },
        "D": null
    }));
    assert_eq!(map.len(), 2);
    assert_eq!(map["B"], "1");
}
