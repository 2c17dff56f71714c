//! Error types for gitssh-util.

/// Failure of a single external command run through a [`crate::Runner`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The program could not be started (e.g. binary not found).
    #[error("cannot execute {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Standard input could not be delivered to the program.
    #[error("cannot write standard input of {program}: {source}")]
    Stdin {
        program: String,
        source: std::io::Error,
    },

    /// Waiting for the program to finish failed.
    #[error("cannot wait for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{program} {}", describe_exit(.code))]
    Exit { program: String, code: Option<i32> },
}

impl RunError {
    /// The program this error belongs to.
    pub fn program(&self) -> &str {
        match self {
            Self::Spawn { program, .. }
            | Self::Stdin { program, .. }
            | Self::Wait { program, .. }
            | Self::Exit { program, .. } => program,
        }
    }

    /// The exit code, when the program ran to completion and was not killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_owned(),
    }
}
