//! Error types for gitssh-engine.

/// Errors produced by the build phase.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `GIT_SSH_KEY` is not set. The one error users are expected to fix themselves.
    #[error("no GIT_SSH_KEY environment variable found")]
    MissingCredential,

    /// The merged build plan does not ask for this buildpack's dependency.
    #[error("layer {name} is not wanted")]
    LayerNotWanted { name: String },

    /// An external tool failed; carried through untouched.
    #[error(transparent)]
    Command(#[from] gitssh_util::RunError),
}
