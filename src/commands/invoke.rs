//! Handler for the `run` and `silent` subcommands.

use std::path::Path;

use tracing::debug;

use crate::cli::InvocationArgs;
use crate::error::CliError;
use crate::invocation::{EnvEntry, Invocation};
use crate::ports::CommandRunner;

/// Run the program described by `args` through `runner`.
///
/// With `show_logs` the runner relays the program's stdout live, so the
/// captured text is not printed again.
///
/// # Errors
///
/// Returns an error if the env file cannot be read or the command fails.
pub fn run(runner: &dyn CommandRunner, args: &InvocationArgs, show_logs: bool) -> Result<(), CliError> {
    let invocation = build_invocation(args, show_logs)?;
    let captured = runner.execute(&invocation)?;
    debug!(command = %invocation.command, captured_bytes = captured.len(), "invocation finished");
    Ok(())
}

/// Builds the invocation, placing env-file entries before `--env` entries.
///
/// # Errors
///
/// Returns an error if the env file cannot be read or parsed.
pub fn build_invocation(args: &InvocationArgs, show_logs: bool) -> Result<Invocation, CliError> {
    let (command, rest) = args
        .command
        .split_first()
        .ok_or_else(|| CliError::Setup("no program given".to_string()))?;

    let mut extra_env = match &args.env_file {
        Some(path) => read_env_file(path)?,
        None => Vec::new(),
    };
    extra_env.extend(args.env.iter().map(ToString::to_string));

    Ok(Invocation { command: command.clone(), args: rest.to_vec(), extra_env, show_logs })
}

/// Reads `KEY=VALUE` entries from a dotenv file, in file order.
fn read_env_file(path: &Path) -> Result<Vec<String>, CliError> {
    let read_err = |e: dotenvy::Error| {
        CliError::Setup(format!("Failed to read env file {}: {e}", path.display()))
    };
    dotenvy::from_path_iter(path)
        .map_err(read_err)?
        .map(|item| item.map(|(key, value)| EnvEntry { key, value }.to_string()).map_err(read_err))
        .collect()
}
