//! Core types shared by every appvars stage.
//!
//! This crate defines the application record ([`AppVars`]) and its key
//! catalogue ([`keys`]), the ecosystem enum ([`ApplicationType`]), the
//! run context ([`ExecutionContext`]), step I/O, `appvars.toml`
//! ([`PipelineConfig`]), and shared error types.

pub mod app_type;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod keys;
pub mod locate;
pub mod record;
pub mod step;

pub use app_type::{ApplicationType, CacheType};
pub use config::{CacheConfig, OutputConfig, PipelineConfig, PruneConfig, PrunePolicy};
pub use context::{CommitRange, EventKind, ExecutionContext, NULL_SHA};
pub use error::{Error, Result};
pub use record::AppVars;
pub use step::{ActionsMasker, RecordingMasker, SecretMasker, StepOutputs};
