use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::record::scalar_text;

/// The git SHA the runner reports for a ref that does not exist (yet).
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// CI event that triggered the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    WorkflowDispatch,
    Other(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "push" => EventKind::Push,
            "pull_request" => EventKind::PullRequest,
            "workflow_dispatch" => EventKind::WorkflowDispatch,
            other => EventKind::Other(other.to_owned()),
        }
    }
}

/// Base/head commits to diff for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub base: String,
    pub head: String,
}

/// Everything a stage may know about the run, gathered once and passed
/// explicitly so stages never read process state on their own.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// `push`, `pull_request`, `workflow_dispatch`, ...
    pub event_name: String,
    /// Webhook payload of the triggering event.
    pub payload: Value,
    /// Commit the workflow runs on.
    pub sha: String,
    /// Full ref, e.g. `refs/heads/main`.
    pub git_ref: String,
    /// Short ref name, e.g. `main` or `42/merge`.
    pub ref_name: String,
    /// `owner/repo`.
    pub repository: String,
    pub server_url: String,
    pub workspace: PathBuf,
    pub runner_os: Option<String>,
    /// Pull request number, when the event carries one.
    pub pr_number: Option<u64>,
    /// The `github` expression context, used for extra env lookups.
    pub github: Value,
    pub github_token: Option<SecretString>,
    pub secrets: BTreeMap<String, SecretString>,
    pub vars: BTreeMap<String, String>,
    /// Wall-clock time of the run on the runner.
    pub now: NaiveDateTime,
}

impl ExecutionContext {
    pub fn event(&self) -> EventKind {
        EventKind::from_name(&self.event_name)
    }

    pub fn is_pull_request(&self) -> bool {
        self.event() == EventKind::PullRequest
    }

    /// Event action, e.g. `closed` for a pull request.
    pub fn action(&self) -> Option<&str> {
        self.payload.get("action").and_then(Value::as_str)
    }

    /// PR number for pull request events only.
    pub fn pull_request_number(&self) -> Option<u64> {
        if self.is_pull_request() {
            self.pr_number
        } else {
            None
        }
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.payload
            .pointer("/repository/default_branch")
            .and_then(Value::as_str)
            .filter(|b| !b.is_empty())
    }

    /// Branch name derived from the full ref.
    pub fn current_branch(&self) -> &str {
        match self.git_ref.strip_prefix("refs/heads/") {
            Some(branch) => branch,
            None => &self.git_ref,
        }
    }

    /// Commit range for diff-based events.
    pub fn commit_range(&self) -> Option<CommitRange> {
        let (base, head) = match self.event() {
            EventKind::Push => (
                self.payload.get("before").and_then(Value::as_str),
                self.payload.get("after").and_then(Value::as_str),
            ),
            EventKind::PullRequest => (
                self.payload
                    .pointer("/pull_request/base/sha")
                    .and_then(Value::as_str),
                self.payload
                    .pointer("/pull_request/head/sha")
                    .and_then(Value::as_str),
            ),
            EventKind::WorkflowDispatch | EventKind::Other(_) => (None, None),
        };
        match (base, head) {
            (Some(base), Some(head)) if !base.is_empty() && !head.is_empty() => {
                Some(CommitRange {
                    base: base.to_owned(),
                    head: head.to_owned(),
                })
            }
            _ => None,
        }
    }

    /// Look up a field of the `github` context. `token` resolves to the run token.
    pub fn github_value(&self, key: &str) -> Option<String> {
        if key == "token" {
            return self
                .github_token
                .as_ref()
                .map(|t| t.expose_secret().to_owned());
        }
        self.github.get(key).and_then(scalar_text)
    }

    pub fn secret(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(|s| s.expose_secret())
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Resolve a path relative to the workspace root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.workspace.join(path)
    }

    /// Gather the context from the runner environment.
    ///
    /// Unreadable optional inputs (event payload, secrets/vars context
    /// files) are logged and left empty; the stages decide whether their
    /// absence matters.
    pub fn from_env() -> Self {
        let opt_env = |key: &str| {
            std::env::var(key)
                // arch-lint: allow(no-silent-result-drop) reason="unset runner variables are optional context"
                .ok()
                .filter(|v| !v.is_empty())
        };
        // arch-lint: allow(no-silent-result-drop) reason="unset runner variables read as empty strings"
        let env = |key: &str| opt_env(key).unwrap_or_default();

        let payload = match opt_env("GITHUB_EVENT_PATH") {
            Some(path) => read_json_file(Path::new(&path)),
            None => Value::Null,
        };

        let pr_number = payload
            .pointer("/pull_request/number")
            .or_else(|| payload.get("number"))
            .and_then(Value::as_u64)
            .or_else(|| {
                opt_env("GH_EVENT_NUMBER")
                    .or_else(|| opt_env("GITHUB_EVENT_NUMBER"))
                    // arch-lint: allow(no-silent-result-drop) reason="a non-numeric event number means no PR number"
                    .and_then(|n| n.parse().ok())
            });

        let workspace = match opt_env("GITHUB_WORKSPACE") {
            Some(dir) => PathBuf::from(dir),
            None => match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot read the current directory, using \".\"");
                    PathBuf::from(".")
                }
            },
        };

        let github = match opt_env("GITHUB_CONTEXT_FILE") {
            Some(path) => read_json_file(Path::new(&path)),
            None => github_from_env(&env),
        };

        let secrets = read_context_map("SECRETS_CONTEXT_FILE")
            .into_iter()
            .map(|(k, v)| (k, SecretString::from(v)))
            .collect();
        let vars = read_context_map("VARS_CONTEXT_FILE");

        Self {
            event_name: env("GITHUB_EVENT_NAME"),
            payload,
            sha: env("GITHUB_SHA"),
            git_ref: env("GITHUB_REF"),
            ref_name: env("GITHUB_REF_NAME"),
            repository: env("GITHUB_REPOSITORY"),
            server_url: opt_env("GITHUB_SERVER_URL")
                // arch-lint: allow(no-silent-result-drop) reason="unset server URL means github.com"
                .unwrap_or_else(|| "https://github.com".to_owned()),
            workspace,
            runner_os: opt_env("RUNNER_OS"),
            pr_number,
            github,
            github_token: opt_env("GITHUB_TOKEN").map(SecretString::from),
            secrets,
            vars,
            now: chrono::Local::now().naive_local(),
        }
    }
}

fn github_from_env(env: &dyn Fn(&str) -> String) -> Value {
    const FIELDS: &[(&str, &str)] = &[
        ("action", "GITHUB_ACTION"),
        ("actor", "GITHUB_ACTOR"),
        ("api_url", "GITHUB_API_URL"),
        ("base_ref", "GITHUB_BASE_REF"),
        ("event_name", "GITHUB_EVENT_NAME"),
        ("head_ref", "GITHUB_HEAD_REF"),
        ("job", "GITHUB_JOB"),
        ("ref", "GITHUB_REF"),
        ("ref_name", "GITHUB_REF_NAME"),
        ("repository", "GITHUB_REPOSITORY"),
        ("repository_owner", "GITHUB_REPOSITORY_OWNER"),
        ("run_attempt", "GITHUB_RUN_ATTEMPT"),
        ("run_id", "GITHUB_RUN_ID"),
        ("run_number", "GITHUB_RUN_NUMBER"),
        ("server_url", "GITHUB_SERVER_URL"),
        ("sha", "GITHUB_SHA"),
        ("workflow", "GITHUB_WORKFLOW"),
        ("workspace", "GITHUB_WORKSPACE"),
    ];
    FIELDS
        .iter()
        .filter_map(|(field, var)| {
            let value = env(var);
            (!value.is_empty()).then(|| ((*field).to_owned(), Value::String(value)))
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn read_json_file(path: &Path) -> Value {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read context file");
            return Value::Null;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to parse context file");
            Value::Null
        }
    }
}

/// Read a flat string map from the JSON file named by `env_var`.
fn read_context_map(env_var: &str) -> BTreeMap<String, String> {
    let Some(path) = std::env::var_os(env_var) else {
        tracing::debug!("environment variable {env_var} not set, context left empty");
        return BTreeMap::new();
    };
    tracing::info!(env_var, path = ?path, "reading context file");
    flatten_context(read_json_file(Path::new(&path)))
}

/// Keep scalar entries of a JSON object as strings.
pub fn flatten_context(value: Value) -> BTreeMap<String, String> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(k, v)| scalar_text(&v).map(|s| (k, s)))
            .collect(),
        _ => BTreeMap::new(),
    }
}
