//! Command runner port for launching external processes.

use crate::error::RunError;
use crate::invocation::Invocation;

/// Runs external commands.
///
/// Abstracting process execution allows deterministic replay by recording
/// and replaying invocation results during cassette playback.
pub trait CommandRunner: Send + Sync {
    /// Runs a fully described invocation and returns the captured stdout.
    ///
    /// The captured text is empty when `show_logs` is off.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Start`] if the process cannot be spawned,
    /// [`RunError::Exit`] if it exits unsuccessfully, and
    /// [`RunError::Capture`] if relaying its output fails.
    fn execute(&self, invocation: &Invocation) -> Result<String, RunError>;

    /// Echoes the command line, relays both streams live, and returns the
    /// captured stdout.
    ///
    /// # Errors
    ///
    /// See [`CommandRunner::execute`]. Captured text is discarded on failure.
    fn run(&self, extra_env: &[&str], command: &str, args: &[&str]) -> Result<String, RunError> {
        self.execute(&Invocation::new(extra_env, command, args, true))
    }

    /// Runs the command without echoing or relaying anything.
    ///
    /// # Errors
    ///
    /// See [`CommandRunner::execute`].
    fn run_silent(&self, extra_env: &[&str], command: &str, args: &[&str]) -> Result<(), RunError> {
        self.execute(&Invocation::new(extra_env, command, args, false)).map(drop)
    }
}
