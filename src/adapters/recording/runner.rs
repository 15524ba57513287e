//! Recording adapter for the `CommandRunner` port.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::record_result;
use crate::cassette::format::{RecordedInput, RUNNER_PORT};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::RunError;
use crate::invocation::Invocation;
use crate::ports::CommandRunner;

/// Records invocations while delegating to an inner implementation.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn execute(&self, invocation: &Invocation) -> Result<String, RunError> {
        let result = self.inner.execute(invocation);
        let input = RecordedInput::from(invocation);
        debug!(command = %invocation.command, ok = result.is_ok(), "recording invocation");
        record_result(
            &self.recorder,
            RUNNER_PORT,
            invocation.entry_point(),
            &invocation.command,
            &input,
            &result,
        );
        result
    }
}
