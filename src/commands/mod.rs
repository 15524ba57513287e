//! Command dispatch and handlers.

pub mod invoke;

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveCommandRunner;
use crate::adapters::recording::RecordingCommandRunner;
use crate::cassette::recorder::CassetteRecorder;
use crate::cli::Command;
use crate::error::CliError;
use crate::ports::CommandRunner;

/// Environment variable naming the cassette file to record into.
pub const RECORD_ENV: &str = "CMDRELAY_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `CMDRELAY_RECORD` is set to a file path, the invocation is recorded
/// to a cassette at that path.
///
/// # Errors
///
/// Returns an error if the environment cannot be resolved, the command
/// fails, or the cassette cannot be written.
pub fn dispatch(command: &Command) -> Result<(), CliError> {
    match env::var_os(RECORD_ENV) {
        Some(path) => dispatch_recording(command, PathBuf::from(path)),
        None => dispatch_with_runner(command, &LiveCommandRunner::new()),
    }
}

/// Dispatch a command with the given runner.
///
/// # Errors
///
/// Returns an error if the environment cannot be resolved or the command fails.
pub fn dispatch_with_runner(command: &Command, runner: &dyn CommandRunner) -> Result<(), CliError> {
    match command {
        Command::Run(args) => invoke::run(runner, args, true),
        Command::Silent(args) => invoke::run(runner, args, false),
    }
}

/// Record the invocation, finishing the cassette even when the command fails.
fn dispatch_recording(command: &Command, path: PathBuf) -> Result<(), CliError> {
    let name = path
        .file_stem()
        .map_or_else(|| "cmdrelay".to_string(), |stem| stem.to_string_lossy().into_owned());
    let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name)));

    let result = {
        let runner =
            RecordingCommandRunner::new(Box::new(LiveCommandRunner::new()), Arc::clone(&recorder));
        dispatch_with_runner(command, &runner)
    };

    finish_recording(recorder)?;
    result
}

/// Finish a recording session and print the cassette path.
fn finish_recording(recorder: Arc<Mutex<CassetteRecorder>>) -> Result<(), CliError> {
    let recorder = Arc::try_unwrap(recorder)
        .map_err(|_| CliError::Setup("cassette recorder is still in use".to_string()))?
        .into_inner()
        .map_err(|_| CliError::Setup("cassette recorder lock poisoned".to_string()))?;
    let path = recorder
        .finish()
        .map_err(|e| CliError::Setup(format!("Failed to write cassette: {e}")))?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}
