#![forbid(unsafe_code)]
//! Process execution for the git SSH buildpack.

pub mod error;
pub mod process;

pub use error::RunError;
pub use process::{CommandRunner, Invocation, Output, Runner};
