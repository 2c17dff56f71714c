//! Build log output in the layout the CNB lifecycle prints.
//!
//! ```text
//! Git SSH Buildpack 1.0.0
//!     Starting SSH agent
//!     Configuring host [github.com]
//!       Probing git@github.com
//! ```

use std::fmt::Display;
use std::io::Write;

use gitssh_config::LogLevel;

const PROCESS_INDENT: &str = "    ";
const DETAIL_INDENT: &str = "      ";

/// Writes user-facing build output. Write failures are ignored: losing a log
/// line never fails the build.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    out: W,
    level: LogLevel,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            level: LogLevel::Info,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// `<name> <version>`, unindented.
    pub fn title(&mut self, name: &str, version: &str) {
        self.line("", format_args!("{name} {version}"));
    }

    /// A step of the build.
    pub fn process(&mut self, message: impl Display) {
        self.line(PROCESS_INDENT, message);
    }

    /// Detail under the current step.
    pub fn detail(&mut self, message: impl Display) {
        self.line(DETAIL_INDENT, message);
    }

    /// Detail shown only with `BP_LOG_LEVEL=DEBUG`.
    pub fn debug(&mut self, message: impl Display) {
        if self.level == LogLevel::Debug {
            self.line(DETAIL_INDENT, message);
        }
    }

    pub fn error(&mut self, message: impl Display) {
        self.line(PROCESS_INDENT, format_args!("error: {message}"));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, indent: &str, message: impl Display) {
        let _ = writeln!(self.out, "{indent}{message}");
    }
}
