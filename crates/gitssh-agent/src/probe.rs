//! Exit-status policy for the `ssh git@<host>` connectivity probe.

use gitssh_util::RunError;

/// How the build treats a failed host probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Keep going with the next host.
    Tolerated,
    /// Abort the build with the probe's error.
    Fatal,
}

impl ProbeOutcome {
    /// Only an exit status greater than 1 is a real connectivity failure.
    ///
    /// Git hosts accept the key and then refuse a shell, so `ssh` exits with
    /// 1 on a healthy connection. Anything that did not produce an exit
    /// status (spawn failure, signal) is tolerated as well.
    pub fn classify(err: &RunError) -> Self {
        match err.exit_code() {
            Some(code) if code > 1 => Self::Fatal,
            _ => Self::Tolerated,
        }
    }

    pub fn is_fatal(self) -> bool {
        self == Self::Fatal
    }
}
