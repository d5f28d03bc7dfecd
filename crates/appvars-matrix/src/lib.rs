//! Stages building the application matrix: loading the application list,
//! type and metadata detection, validation, change detection, version
//! stamping and matrix shaping.

pub mod changes;
pub mod dependency;
pub mod detect;
pub mod matrix;
pub mod meta;
pub mod spec;
pub mod validate;
pub mod version;

pub use changes::{WatchSet, detect_changes};
pub use dependency::Dependency;
pub use matrix::{Matrix, MatrixEntry};
pub use meta::AppMetadata;
pub use version::Stamped;
