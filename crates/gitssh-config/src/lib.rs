//! Build environment snapshot and build plan flags for the git SSH buildpack.

pub mod env;
pub mod plan;

pub use env::{BuildEnv, Credential, HostList, LogLevel};
pub use plan::{merged_flags, PlanFlags};
