//! Build version stamping.

use appvars_core::{AppVars, ExecutionContext, keys};
use chrono::{NaiveDateTime, SecondsFormat, Timelike};

/// `YYYY.MM.DD.S`, `S` being the seconds elapsed since midnight, rounded.
pub fn version_for(now: NaiveDateTime) -> String {
    let seconds = now.num_seconds_from_midnight() + u32::from(now.nanosecond() >= 500_000_000);
    format!("{}.{seconds}", now.format("%Y.%m.%d"))
}

/// Version shared by every application of the run.
pub fn run_version(ctx: &ExecutionContext) -> String {
    let version = version_for(ctx.now);
    match pr_number(ctx) {
        Some(pr) => format!("pr-{pr}-{version}"),
        None => version,
    }
}

fn pr_number(ctx: &ExecutionContext) -> Option<u64> {
    if !ctx.is_pull_request() {
        return None;
    }
    if ctx.pr_number.is_none() {
        tracing::warn!("pull request event without a PR number");
    }
    ctx.pr_number
}

/// Records stamped with one run version, and the version itself.
#[derive(Debug, Clone)]
pub struct Stamped {
    pub apps: Vec<AppVars>,
    pub version: String,
}

/// Stamp `application-version`, `application-build-timestamp` and
/// `application-image-name` onto every record.
pub fn stamp(ctx: &ExecutionContext, apps: Vec<AppVars>) -> Stamped {
    let version = run_version(ctx);
    let timestamp = ctx
        .now
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::AutoSi, true);
    let pr = pr_number(ctx);
    tracing::info!(version, timestamp, "stamping build version");

    let apps = apps
        .into_iter()
        .map(|mut app| {
            let image_name = match pr {
                Some(pr) => format!("{}-pr-{pr}", app.name()),
                None => app.name().to_owned(),
            };
            app.set(keys::APPLICATION_VERSION, version.as_str());
            app.set(keys::APPLICATION_BUILD_TIMESTAMP, timestamp.as_str());
            app.set(keys::APPLICATION_IMAGE_NAME, image_name);
            app
        })
        .collect();

    Stamped { apps, version }
}
