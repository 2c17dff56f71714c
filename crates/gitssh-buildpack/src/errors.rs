use std::io::Write;

use gitssh_engine::{Emitter, EngineError, BUILD_FAILURE_STATUS};

/// Status for failures the lifecycle does not assign a code to.
pub(crate) const GENERIC_FAILURE_STATUS: i32 = 1;

#[derive(Debug, thiserror::Error)]
pub(crate) enum GitSshBuildpackError {
    #[error("cannot declare build plan: {0}")]
    BuildPlan(toml::ser::Error),

    #[error("failed to contribute sshagent layer: {0}")]
    Contribute(EngineError),
}

impl From<GitSshBuildpackError> for libcnb::Error<GitSshBuildpackError> {
    fn from(error: GitSshBuildpackError) -> Self {
        Self::BuildpackError(error)
    }
}

/// Exit status for a failed detect or build.
pub(crate) fn failure_status(error: &libcnb::Error<GitSshBuildpackError>) -> i32 {
    match error {
        libcnb::Error::BuildpackError(GitSshBuildpackError::Contribute(_)) => BUILD_FAILURE_STATUS,
        _ => GENERIC_FAILURE_STATUS,
    }
}

/// Put `error` on the build log and return the status to exit with.
///
/// Failures inside libcnb (an unreadable buildpack plan, a layer that cannot
/// be written) are reported the same way as the buildpack's own.
pub(crate) fn report<W: Write>(
    error: &libcnb::Error<GitSshBuildpackError>,
    log: &mut Emitter<W>,
) -> i32 {
    match error {
        libcnb::Error::BuildpackError(inner) => log.error(inner),
        other => log.error(other),
    }
    failure_status(error)
}
