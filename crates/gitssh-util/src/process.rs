//! Process execution seam for the buildpack's external tools.
//!
//! Every external call goes through [`Runner`], so the build sequence can be
//! exercised against a recorded call table instead of real binaries.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::RunError;

/// Destination of a child's stdout or stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Share this process's stream.
    #[default]
    Inherit,
    /// Drop everything the child writes.
    Discard,
}

impl Output {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Discard => Stdio::null(),
        }
    }
}

/// A single external command: program, argument vector, stdio wiring and
/// per-process environment overrides.
///
/// Standard input is closed unless [`Invocation::stdin`] supplies bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Zeroizing<Vec<u8>>>,
    pub stdout: Output,
    pub stderr: Output,
    pub envs: BTreeMap<String, String>,
}

impl Invocation {
    /// Start describing a call to `program` with no arguments and inherited output.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_owned(),
            args: Vec::new(),
            stdin: None,
            stdout: Output::Inherit,
            stderr: Output::Inherit,
            envs: BTreeMap::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Feed `bytes` to the child's standard input, then close it.
    pub fn stdin(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(Zeroizing::new(bytes));
        self
    }

    pub fn stdout(mut self, output: Output) -> Self {
        self.stdout = output;
        self
    }

    pub fn stderr(mut self, output: Output) -> Self {
        self.stderr = output;
        self
    }

    /// Set an environment variable for this child only.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.insert(key.to_owned(), value.to_owned());
        self
    }

    /// The command line as it would be typed, for log output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field(
                "stdin",
                &self.stdin.as_ref().map(|bytes| format!("<{} bytes>", bytes.len())),
            )
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("envs", &self.envs)
            .finish()
    }
}

/// Runs external commands to completion.
pub trait Runner {
    /// Run `invocation` and wait for it to exit.
    ///
    /// # Errors
    /// Returns an error if the program cannot be started, its standard input
    /// cannot be written, or it exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<(), RunError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: &Invocation) -> Result<(), RunError> {
        (**self).run(invocation)
    }
}

/// [`Runner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl Runner for CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), RunError> {
        debug!(
            program = %invocation.program,
            args = ?invocation.args,
            envs = ?invocation.envs,
            "running command"
        );

        let stdin = if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(&invocation.envs)
            .stdin(stdin)
            .stdout(invocation.stdout.stdio())
            .stderr(invocation.stderr.stdio())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if let (Some(bytes), Some(mut pipe)) = (&invocation.stdin, child.stdin.take()) {
            let written = pipe.write_all(bytes);
            // Closing the pipe signals EOF to the child.
            drop(pipe);
            if let Err(source) = written {
                let _ = child.wait();
                return Err(RunError::Stdin {
                    program: invocation.program.clone(),
                    source,
                });
            }
        }

        let status = child.wait().map_err(|source| RunError::Wait {
            program: invocation.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Exit {
                program: invocation.program.clone(),
                code: status.code(),
            })
        }
    }
}
