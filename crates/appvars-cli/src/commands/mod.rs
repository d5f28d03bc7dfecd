mod build_envs;
mod changes;
mod config_branch;
mod envs;
mod matrix;

use appvars_core::{ExecutionContext, PipelineConfig, StepOutputs};

/// Output carrying the serialized record(s) to the next step.
pub(crate) const APPVARS_OUTPUT: &str = "APPVARS";

pub use build_envs::{collect, require};
pub use changes::detect_changes;
pub use config_branch::config_branch;
pub use envs::{cache, docker_maven, finalize, merge_inputs, repo};
pub use matrix::{app_meta, convert, detect_type, matrix, validate_input, validate_result, version};

pub(crate) fn context() -> ExecutionContext {
    ExecutionContext::from_env()
}

pub(crate) fn outputs() -> StepOutputs {
    StepOutputs::from_env()
}

pub(crate) fn config(ctx: &ExecutionContext) -> anyhow::Result<PipelineConfig> {
    Ok(PipelineConfig::load(&ctx.workspace)?)
}
