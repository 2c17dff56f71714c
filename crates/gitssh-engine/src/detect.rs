//! Detect phase: participate only when a key is available.

use gitssh_config::{BuildEnv, PlanFlags};
use libcnb::data::build_plan::{BuildPlan, BuildPlanBuilder, Require};

use crate::DEPENDENCY;

/// Shown when detection fails.
pub const NO_KEY_MESSAGE: &str = "No GIT_SSH_KEY variable found";

/// Flags requested for the dependency: needed while building, not at launch.
pub const REQUESTED_FLAGS: PlanFlags = PlanFlags {
    build: true,
    launch: false,
    cache: false,
};

/// Result of the detect phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Participate with [`build_plan`].
    Pass,
    /// Do not participate.
    Fail { reason: &'static str },
}

/// Decide whether the buildpack participates. Reads `env` only.
pub fn detect(env: &BuildEnv) -> Detection {
    if env.credential().is_some() {
        Detection::Pass
    } else {
        Detection::Fail {
            reason: NO_KEY_MESSAGE,
        }
    }
}

/// The plan declared on a pass: provide `sshagent` and require it for the
/// build only.
///
/// # Errors
/// Returns an error if the flags cannot be encoded as plan metadata.
pub fn build_plan() -> Result<BuildPlan, toml::ser::Error> {
    let mut require = Require::new(DEPENDENCY);
    require.metadata(REQUESTED_FLAGS)?;
    Ok(BuildPlanBuilder::new()
        .provides(DEPENDENCY)
        .requires(require)
        .build())
}
