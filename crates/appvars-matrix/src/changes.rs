//! Per-application change detection against the event's commit range.

use std::sync::LazyLock;

use appvars_core::{AppVars, EventKind, ExecutionContext, keys};
use appvars_git::{GitClient, GitExecutor};
use regex::Regex;
use serde_json::Value;

/// Release tags produced by the version stamper: `YYYY.MM.DD.N` (or `YY.MM.DD.N`).
static RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}|\d{2})\.\d{2}\.\d{2}\.\d+$").expect("release tag regex is valid")
});

pub fn is_release_tag(tag: &str) -> bool {
    RELEASE_TAG.is_match(tag)
}

/// Strip `./` or a leading `/`, a trailing `/`, and unify separators.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let mut rest = path.as_str();
    if let Some(stripped) = rest.strip_prefix("./").or_else(|| rest.strip_prefix('/')) {
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_suffix('/') {
        rest = stripped;
    }
    rest.to_owned()
}

/// Paths whose modification counts as a change for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSet {
    source_dir: String,
    files: Vec<String>,
}

impl WatchSet {
    pub fn new(source_path: &str, additional: &[String]) -> Self {
        Self {
            source_dir: normalize_path(source_path),
            files: additional
                .iter()
                .map(|f| normalize_path(f))
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Watch set of a record: its source directory plus
    /// `application-additional-watch-files` (comma-separated or a list).
    pub fn for_app(app: &AppVars) -> Self {
        let source_path = app.source_path();
        let additional = match app.get(keys::APPLICATION_ADDITIONAL_WATCH_FILES) {
            Some(Value::String(s)) => s.split(',').map(str::to_owned).collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        };
        Self::new(&source_path, &additional)
    }

    /// The source directory is the repository root.
    pub fn is_root(&self) -> bool {
        self.source_dir.is_empty() || self.source_dir == "."
    }

    pub fn matches(&self, changed_file: &str) -> bool {
        let file = changed_file.replace('\\', "/");
        if self.is_root() {
            return true;
        }
        if file.starts_with(&format!("{}/", self.source_dir)) {
            return true;
        }
        self.files
            .iter()
            .any(|watched| file == *watched || file.starts_with(&format!("{watched}/")))
    }

    /// Root applications count as changed on any change at all.
    pub fn has_changes(&self, changed_files: &[String]) -> bool {
        changed_files.iter().any(|f| self.matches(f))
    }
}

/// What the event tells us to do before looking at any file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Plan {
    /// Closed pull request: nothing is rebuilt.
    Closed,
    /// Every application counts as changed.
    AllChanged,
    /// Diff `base..head`; tags are looked up from `base`.
    Diff { base: String, head: String },
    /// The event should have carried a range but did not.
    MissingRange,
}

fn plan(ctx: &ExecutionContext) -> Plan {
    match ctx.event() {
        EventKind::PullRequest if ctx.action() == Some("closed") => Plan::Closed,
        EventKind::Push | EventKind::PullRequest => match ctx.commit_range() {
            Some(range) => Plan::Diff {
                base: range.base,
                head: range.head,
            },
            None => Plan::MissingRange,
        },
        EventKind::WorkflowDispatch => Plan::AllChanged,
        EventKind::Other(name) => {
            tracing::warn!(event = %name, "unsupported event type for change detection, assuming changes");
            Plan::AllChanged
        }
    }
}

/// Annotate every record with `has-changes` and, for unchanged ones, the
/// release tag they can reuse as `application-previous-version-tag`.
///
/// Git failures degrade to "no changes" / "no tag" with a warning.
pub async fn detect_changes<E: GitExecutor>(
    ctx: &ExecutionContext,
    git: &GitClient<E>,
    apps: Vec<AppVars>,
) -> Vec<AppVars> {
    tracing::info!(event = %ctx.event_name, action = ?ctx.action(), "detecting changes");

    let (changed_files, tag_sha) = match plan(ctx) {
        Plan::Closed => {
            tracing::info!("pull request is closed, skipping change detection");
            return annotate_all(apps, false);
        }
        Plan::AllChanged => {
            return annotate_all(apps, true);
        }
        Plan::MissingRange => {
            tracing::warn!("could not determine base or head SHA for diff, assuming no changes");
            (Vec::new(), None)
        }
        Plan::Diff { base, head } => {
            let files = match git.changed_files(&base, &head).await {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(error = %e, "git diff/ls-tree failed, assuming no relevant changes");
                    Vec::new()
                }
            };
            (files, Some(base))
        }
    };

    let statuses: Vec<bool> = apps
        .iter()
        .map(|app| {
            let changed = !changed_files.is_empty()
                && WatchSet::for_app(app).has_changes(&changed_files);
            tracing::info!(app = %app.display_name(), has_changes = changed, "change status determined");
            changed
        })
        .collect();

    let previous_tag = if statuses.iter().any(|changed| !changed) {
        match tag_sha {
            Some(sha) => previous_release_tag(git, &sha).await,
            None => {
                tracing::warn!("cannot determine previous tag because the base SHA is missing");
                None
            }
        }
    } else {
        None
    };

    annotate_each(apps, &statuses, previous_tag)
}

/// Shared tag lookup for every unchanged application.
async fn previous_release_tag<E: GitExecutor>(git: &GitClient<E>, sha: &str) -> Option<String> {
    let tag = match git.latest_reachable_tag(sha).await {
        Ok(tag) => tag?,
        Err(e) => {
            tracing::warn!(sha, error = %e, "git describe failed unexpectedly");
            return None;
        }
    };
    if is_release_tag(&tag) {
        tracing::info!(tag, "using latest reachable tag as the common previous tag");
        Some(tag)
    } else {
        tracing::warn!(tag, "latest reachable tag does not match the release tag format");
        None
    }
}

fn annotate_all(apps: Vec<AppVars>, changed: bool) -> Vec<AppVars> {
    let statuses = vec![changed; apps.len()];
    annotate_each(apps, &statuses, None)
}

fn annotate_each(apps: Vec<AppVars>, statuses: &[bool], previous_tag: Option<String>) -> Vec<AppVars> {
    apps.into_iter()
        .zip(statuses)
        .map(|(mut app, &changed)| {
            app.set(keys::HAS_CHANGES, changed);
            let tag = if changed { None } else { previous_tag.clone() };
            app.set(keys::APPLICATION_PREVIOUS_VERSION_TAG, tag.clone());
            tracing::info!(
                app = %app.display_name(),
                has_changes = changed,
                previous_version_tag = ?tag,
                "change flags assigned"
            );
            app
        })
        .collect()
}
