//! Build phase: bring up the SSH agent and describe the layer exposing it.
//!
//! The sequence is strictly linear. Each step either succeeds or ends the
//! build with its own error:
//!
//! 1. confirm the plan asks for `sshagent`
//! 2. read `GIT_SSH_KEY`
//! 3. `ssh-agent -a <socket>`
//! 4. `ssh-add -` with the key on stdin
//! 5. per host: `git config` rewrite, then the `ssh` probe unless
//!    `GIT_SSH_DONT_CONNECT` is set
//! 6. return the [`Contribution`] whose [`LayerEnv`] exports `SSH_AUTH_SOCK`

use std::io::Write;

use gitssh_agent::{commands, AgentSession, ProbeOutcome, SOCK_ADDRESS};
use gitssh_config::{merged_flags, BuildEnv, PlanFlags};
use gitssh_util::Runner;
use libcnb::data::buildpack_plan::Entry;
use libcnb::layer_env::{LayerEnv, ModificationBehavior, Scope};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::log::Emitter;
use crate::DEPENDENCY;

/// What a successful build hands to the layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// Merged plan flags; decide whether the layer is visible at build and launch.
    pub flags: PlanFlags,
    pub session: AgentSession,
}

impl Contribution {
    /// `SSH_AUTH_SOCK` for later buildpacks, and for the launch image too when
    /// the plan asked for launch.
    pub fn layer_env(&self) -> LayerEnv {
        let (name, value) = self.session.binding();
        let env = LayerEnv::new().chainable_insert(
            Scope::Build,
            ModificationBehavior::Override,
            &name,
            &value,
        );
        if self.flags.launch {
            env.chainable_insert(Scope::Launch, ModificationBehavior::Override, name, value)
        } else {
            env
        }
    }
}

/// Run the contribution sequence against the plan `entries` merged for
/// this buildpack.
///
/// # Errors
/// Returns [`EngineError::LayerNotWanted`] before any command runs if the plan
/// has no `sshagent` entry, [`EngineError::MissingCredential`] if `GIT_SSH_KEY`
/// is unset, and the failing command's error as-is otherwise.
pub fn contribute<R: Runner, W: Write>(
    entries: &[Entry],
    env: &BuildEnv,
    runner: &R,
    log: &mut Emitter<W>,
) -> Result<Contribution, EngineError> {
    let Some(flags) = merged_flags(entries, DEPENDENCY) else {
        return Err(EngineError::LayerNotWanted {
            name: DEPENDENCY.to_owned(),
        });
    };

    let Some(credential) = env.credential() else {
        log.error("No GIT_SSH_KEY environment variable found");
        return Err(EngineError::MissingCredential);
    };

    log.process("Starting SSH agent");
    runner
        .run(&commands::start_agent(SOCK_ADDRESS))
        .inspect_err(|e| log.error(format_args!("Failed to start ssh-agent [{e}]")))?;
    let session = AgentSession::new(SOCK_ADDRESS);
    debug!(socket = session.socket(), "ssh-agent started");

    log.process("Adding SSH key");
    runner
        .run(&session.add_key(&credential))
        .inspect_err(|e| log.error(format_args!("Failed to add SSH key [{e}]")))?;

    let hosts = env.hosts();
    let skip_connect = env.skip_connect();
    log.debug(format_args!("Hosts: {hosts}"));

    for host in &hosts {
        log.process(format_args!("Configuring host [{host}]"));
        runner.run(&session.rewrite_https(host)).inspect_err(|e| {
            log.error(format_args!(
                "Failed to configure git for SSH on host [{host}] [{e}]"
            ));
        })?;

        if skip_connect {
            log.debug(format_args!("Skipping connectivity check for [{host}]"));
            continue;
        }

        log.detail(format_args!("Probing git@{host}"));
        if let Err(e) = runner.run(&session.probe_host(host)) {
            if ProbeOutcome::classify(&e).is_fatal() {
                log.error(format_args!("Failed to authorize with [{host}] [{e}]"));
                return Err(e.into());
            }
            warn!(host = %host, error = %e, "ssh probe failed, continuing");
            log.debug(format_args!("Probe of [{host}] returned: {e}"));
        }
    }

    Ok(Contribution { flags, session })
}
