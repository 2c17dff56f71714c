//! Recording [`Runner`] for exercising the build sequence without processes.

use std::cell::RefCell;
use std::collections::VecDeque;

use gitssh_util::{Invocation, RunError, Runner};

/// Records every invocation and answers from a script. Once the script is
/// exhausted every call succeeds.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    script: RefCell<VecDeque<Result<(), RunError>>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next call.
    pub(crate) fn then(self, result: Result<(), RunError>) -> Self {
        self.script.borrow_mut().push_back(result);
        self
    }

    pub(crate) fn then_ok(self) -> Self {
        self.then(Ok(()))
    }

    pub(crate) fn then_exit(self, program: &str, code: i32) -> Self {
        self.then(Err(RunError::Exit {
            program: program.to_owned(),
            code: Some(code),
        }))
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Each call as `program arg arg ...`.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }
}

impl Runner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), RunError> {
        self.calls.borrow_mut().push(invocation.clone());
        self.script.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}
