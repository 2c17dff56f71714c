//! The external tools behind the SSH agent layer: `ssh-agent`, `ssh-add`,
//! `git config` and the `ssh` host probe.

pub mod commands;
pub mod probe;

pub use commands::{AgentSession, AUTH_SOCK_VAR, SOCK_ADDRESS};
pub use probe::ProbeOutcome;
