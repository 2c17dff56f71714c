//! Detect and build phases of the git SSH buildpack.

pub mod build;
pub mod detect;
pub mod error;
pub mod log;

#[cfg(test)]
mod testing;

pub use build::{contribute, Contribution};
pub use detect::{build_plan, detect, Detection};
pub use error::EngineError;
pub use log::Emitter;

/// Name of the build plan dependency this buildpack provides and requires.
pub const DEPENDENCY: &str = "sshagent";

/// Build exit status when the layer could not be contributed.
pub const BUILD_FAILURE_STATUS: i32 = 103;
