//! Git plumbing used by change detection and config-branch resolution.

pub mod branch;
pub mod client;
pub mod error;
pub mod executor;

pub use branch::resolve_config_branch;
pub use client::GitClient;
pub use error::GitError;
pub use executor::{GitExecutor, RealExecutor};
