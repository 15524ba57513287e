//! Error types for command runs and the CLI surface.

use std::io;

/// Failure of a single command invocation.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The process could not be started (missing binary, permissions,
    /// invalid environment entry).
    #[error("failed to start `{command}`: {source}")]
    Start {
        /// Program that failed to start.
        command: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The process ran but did not exit successfully.
    #[error("`{command}` {}", exit_description(*.code))]
    Exit {
        /// Program that failed.
        command: String,
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Relaying stdout or stderr hit an I/O error.
    #[error("unable to capture stdout or stderr")]
    Capture,
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl RunError {
    /// Short, stable name of the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Exit { .. } => "exit",
            Self::Capture => "capture",
        }
    }

    /// Exit code of the child when it exited with a non-zero status.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

/// An extra environment entry that is not `KEY=VALUE` with a non-empty key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid environment entry {entry:?}: expected KEY=VALUE with a non-empty KEY")]
pub struct InvalidEnvEntry {
    /// The rejected entry, verbatim.
    pub entry: String,
}

/// Errors surfaced by the `cmdrelay` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Argument parsing failed, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Setup around the run failed (env file, cassette I/O).
    #[error("{0}")]
    Setup(String),

    /// The command itself failed.
    #[error(transparent)]
    Run(#[from] RunError),
}

impl CliError {
    /// Process exit code for this failure.
    ///
    /// Forwards the child's own exit code when it has one in `1..=255`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(err) => u8::try_from(err.exit_code()).unwrap_or(2),
            Self::Run(err) => err
                .exit_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            Self::Setup(_) => 1,
        }
    }
}
