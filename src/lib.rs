//! Run external commands with live output relay and stdout capture.
//!
//! The [`CommandRunner`] port offers two entry points: [`CommandRunner::run`]
//! echoes the command line, relays the child's stdout and stderr as they are
//! written, and returns the captured stdout; [`CommandRunner::run_silent`]
//! only reports success or failure. [`LiveCommandRunner`] launches real
//! processes; the recording and replaying adapters capture invocations to a
//! cassette and serve them back without spawning anything.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod echo;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod ports;
pub mod relay;

pub use adapters::live::LiveCommandRunner;
pub use adapters::recording::RecordingCommandRunner;
pub use adapters::replaying::ReplayingCommandRunner;
pub use error::{CliError, RunError};
pub use invocation::{EnvEntry, Invocation};
pub use ports::CommandRunner;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli.command)
}

#[cfg(all(test, unix))]
mod tests {
    use super::run;
    use crate::error::{CliError, RunError};

    #[test]
    fn run_executes_silent_command() {
        let result = run(["cmdrelay", "silent", "true"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_forwards_exit_failure() {
        let result = run(["cmdrelay", "silent", "sh", "-c", "exit 4"]);
        assert!(matches!(result, Err(CliError::Run(RunError::Exit { code: Some(4), .. }))));
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["cmdrelay", "unknown"]);
        assert!(matches!(result, Err(CliError::Usage(_))));
    }
}
