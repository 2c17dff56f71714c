//! Invocation builders for the four external commands.
//!
//! The argument vectors here are the interoperability contract with the real
//! tools; tests elsewhere compare against them verbatim.

use gitssh_config::Credential;
use gitssh_util::{Invocation, Output};

/// Socket the agent listens on for the duration of the build.
pub const SOCK_ADDRESS: &str = "/tmp/git-ssh-buildpack.sock";

/// Variable through which `ssh-add`, `ssh` and `git` locate the agent.
pub const AUTH_SOCK_VAR: &str = "SSH_AUTH_SOCK";

/// `ssh-agent -a <socket>`, stdout discarded, stderr passed through.
pub fn start_agent(socket: &str) -> Invocation {
    Invocation::new("ssh-agent")
        .arg("-a")
        .arg(socket)
        .stdout(Output::Discard)
}

/// A running agent. Commands bound to it see its socket as `SSH_AUTH_SOCK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSession {
    socket: String,
}

impl AgentSession {
    pub fn new(socket: &str) -> Self {
        Self {
            socket: socket.to_owned(),
        }
    }

    pub fn socket(&self) -> &str {
        &self.socket
    }

    /// The environment binding this session contributes.
    pub fn binding(&self) -> (String, String) {
        (AUTH_SOCK_VAR.to_owned(), self.socket.clone())
    }

    /// Point `invocation` at this agent.
    ///
    /// This is the only place the socket crosses into a child's environment.
    pub fn bind(&self, invocation: Invocation) -> Invocation {
        invocation.env(AUTH_SOCK_VAR, &self.socket)
    }

    /// `ssh-add -` with the key and a trailing newline on stdin.
    pub fn add_key(&self, credential: &Credential) -> Invocation {
        self.bind(
            Invocation::new("ssh-add")
                .arg("-")
                .stdin(credential.stdin_payload()),
        )
    }

    /// `git config --global url.git@<host>:.insteadOf https://<host>/`
    pub fn rewrite_https(&self, host: &str) -> Invocation {
        self.bind(
            Invocation::new("git")
                .arg("config")
                .arg("--global")
                .arg(format!("url.git@{host}:.insteadOf"))
                .arg(format!("https://{host}/")),
        )
    }

    /// `ssh -o StrictHostKeyChecking=accept-new git@<host>`
    pub fn probe_host(&self, host: &str) -> Invocation {
        self.bind(
            Invocation::new("ssh")
                .arg("-o")
                .arg("StrictHostKeyChecking=accept-new")
                .arg(format!("git@{host}")),
        )
    }
}
