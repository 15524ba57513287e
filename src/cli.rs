//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::invocation::EnvEntry;

/// Top-level CLI parser for `cmdrelay`.
#[derive(Debug, Parser)]
#[command(
    name = "cmdrelay",
    version,
    about = "Run a command, relay its output live, and capture stdout"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Echo the command line and relay stdout and stderr while it runs.
    Run(InvocationArgs),
    /// Run the command without echoing it or relaying its output.
    Silent(InvocationArgs),
}

/// What to run and which extra environment to give it.
#[derive(Debug, Args)]
pub struct InvocationArgs {
    /// Extra environment entry, applied after the inherited environment.
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<EnvEntry>,

    /// Dotenv file with extra entries, applied before any `--env` entry.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Program to run followed by its arguments, taken verbatim.
    #[arg(required = true, trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
