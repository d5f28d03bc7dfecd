//! Dependency cache keys.

use std::path::Path;

use appvars_core::{AppVars, CacheConfig, CacheType, ExecutionContext, keys, locate};
use chrono::NaiveDateTime;

/// Hash placeholder when the search directory has no lockfile.
pub const NO_LOCKFILE: &str = "no-lockfile";
/// Hash placeholder when the lockfile cannot be read.
pub const HASH_ERROR: &str = "hash-error";

/// Primary key, ordered restore keys and the PR prefix of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    pub primary: String,
    pub restore: Vec<String>,
    pub pr_base: String,
}

impl CacheKeys {
    /// Build the key family.
    ///
    /// `pull_request` selects the PR-scoped primary key. A missing
    /// `pr_number` is spelled `no-pr`. The PR prefix is always computed.
    pub fn compute(
        os: &str,
        cache_type: CacheType,
        now: NaiveDateTime,
        pull_request: bool,
        pr_number: Option<u64>,
        hash: &str,
    ) -> Self {
        let minimum = format!("{os}-{}-", cache_type.as_str());
        let month = now.format("%b").to_string().to_lowercase();
        let year = now.format("%y");
        let base_fallback = format!("{minimum}{month}-{year}-");
        let base = format!("{base_fallback}{hash}");

        let pr = match pr_number {
            Some(n) => n.to_string(),
            None => "no-pr".to_owned(),
        };
        let pr_fallback = format!("{minimum}pr{pr}-");
        let pr_key = format!("{pr_fallback}{hash}");

        if pull_request {
            Self {
                primary: pr_key.clone(),
                restore: vec![pr_key, pr_fallback.clone(), base, base_fallback, minimum],
                pr_base: pr_fallback,
            }
        } else {
            Self {
                primary: base.clone(),
                restore: vec![base, base_fallback, minimum],
                pr_base: pr_fallback,
            }
        }
    }

    pub fn restore_keys(&self) -> String {
        self.restore.join("\n")
    }
}

/// First 8 hex digits of the lockfile's MD5, or a placeholder.
pub fn lockfile_hash(dir: &Path, cache_type: CacheType) -> String {
    let lockfile = dir.join(cache_type.lockfile());
    if !lockfile.is_file() {
        tracing::warn!(
            lockfile = cache_type.lockfile(),
            dir = %dir.display(),
            "lockfile not found, cache key hash will be based on '{NO_LOCKFILE}'"
        );
        return NO_LOCKFILE.to_owned();
    }
    match std::fs::read(&lockfile) {
        Ok(content) => {
            let digest = format!("{:x}", md5::compute(content));
            digest[..8].to_owned()
        }
        Err(e) => {
            tracing::warn!(path = %lockfile.display(), error = %e, "failed to hash lockfile");
            HASH_ERROR.to_owned()
        }
    }
}

/// Attach cache path and keys when caching is enabled, or strip the
/// generated keys when it is not.
pub fn derive_cache(ctx: &ExecutionContext, config: &CacheConfig, mut app: AppVars) -> AppVars {
    if !app.is_truthy(keys::GITHUB_DEPENDENCIES_CACHE_ENABLED) {
        tracing::info!("dependency caching is disabled");
        strip_keys(&mut app);
        return app;
    }

    let cache_type = match app.application_type() {
        Ok(app_type) => app_type.and_then(|t| t.cache_type()),
        Err(e) => {
            tracing::warn!(error = %e, "cannot map application-type to a cache type");
            None
        }
    };
    let Some(cache_type) = cache_type else {
        tracing::warn!(
            application_type = ?app.text(keys::APPLICATION_TYPE),
            "unsupported application-type for caching, skipping cache key generation"
        );
        strip_keys(&mut app);
        return app;
    };

    app.set_default(
        keys::GITHUB_DEPENDENCIES_CACHE_PATH,
        config.default_path(cache_type, "${HOME}"),
    );

    let dir = match app.text(keys::APPLICATION_SOURCE_PATH).filter(|s| !s.is_empty()) {
        Some(source_path) => locate::search_dir(&ctx.workspace, &source_path),
        None => ctx.workspace.clone(),
    };
    let hash = lockfile_hash(&dir, cache_type);

    let os = match ctx.runner_os.as_deref() {
        Some(os) if !os.is_empty() => os.to_lowercase(),
        _ => "unknownos".to_owned(),
    };
    let cache_keys = CacheKeys::compute(
        &os,
        cache_type,
        ctx.now,
        ctx.is_pull_request(),
        ctx.pull_request_number(),
        &hash,
    );

    tracing::info!(
        cache_type = cache_type.as_str(),
        key = %cache_keys.primary,
        pr_base_key = %cache_keys.pr_base,
        "cache keys derived"
    );
    app.set(keys::GITHUB_DEPENDENCIES_CACHE_KEY, cache_keys.primary.as_str());
    app.set(keys::GITHUB_DEPENDENCIES_CACHE_RESTORE_KEYS, cache_keys.restore_keys());
    app.set(keys::GITHUB_DEPENDENCIES_CACHE_PR_BASE_KEY, cache_keys.pr_base);
    app
}

fn strip_keys(app: &mut AppVars) {
    for key in keys::CACHE_KEYS {
        app.remove(key);
    }
}
