//! Per-application build environment stages.
//!
//! Each stage takes the [`ExecutionContext`](appvars_core::ExecutionContext)
//! and one [`AppVars`](appvars_core::AppVars) record and returns the
//! enriched record: inputs are merged, repository and PR-deploy facts
//! added, Docker/Maven fields processed, cache keys derived and the
//! result finalized into a full and a secret-free view.

pub mod cache;
pub mod collect;
pub mod docker_maven;
pub mod error;
pub mod finalize;
pub mod merge;
pub mod repo;
pub mod require;

pub use cache::{CacheKeys, derive_cache};
pub use collect::collect_envs;
pub use docker_maven::enrich_docker_maven;
pub use error::EnvsError;
pub use finalize::{Finalized, finalize};
pub use merge::{ActionInputs, merge_inputs};
pub use repo::enrich_repo;
pub use require::{check_required, parse_required_keys};
