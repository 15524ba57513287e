//! Cassette data structures for recording and replaying invocations.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::invocation::Invocation;

/// Port name under which runner interactions are recorded.
pub const RUNNER_PORT: &str = "runner";

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (always [`RUNNER_PORT`] for invocations).
    pub port: String,
    /// Entry point invoked on the port (`run` or `run_silent`).
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Recorded input of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedInput {
    /// Program name.
    pub command: String,
    /// Program arguments.
    pub args: Vec<String>,
    /// Extra environment entries, verbatim.
    pub extra_env: Vec<String>,
}

impl From<&Invocation> for RecordedInput {
    fn from(invocation: &Invocation) -> Self {
        Self {
            command: invocation.command.clone(),
            args: invocation.args.clone(),
            extra_env: invocation.extra_env.clone(),
        }
    }
}

/// Serializable form of a [`RunError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedFailure {
    /// Failure kind: `start`, `exit` or `capture`.
    pub kind: String,
    /// Program that failed.
    pub command: String,
    /// Exit code for `exit` failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Rendered error message.
    pub message: String,
}

impl RecordedFailure {
    /// Captures a failure for the given program.
    #[must_use]
    pub fn from_error(command: &str, err: &RunError) -> Self {
        let message = match err {
            RunError::Start { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        Self {
            kind: err.kind().to_string(),
            command: command.to_string(),
            code: err.exit_code(),
            message,
        }
    }

    /// Rebuilds the failure as a [`RunError`] of the same kind.
    ///
    /// Unknown kinds come back as capture failures.
    #[must_use]
    pub fn into_error(self) -> RunError {
        match self.kind.as_str() {
            "start" => RunError::Start { command: self.command, source: io::Error::other(self.message) },
            "exit" => RunError::Exit { command: self.command, code: self.code },
            _ => RunError::Capture,
        }
    }
}

/// Recorded outcome, using the `{"Ok": ..}` / `{"Err": ..}` convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordedOutcome {
    /// Captured stdout of a successful run.
    Ok(String),
    /// Failure of the run.
    Err(RecordedFailure),
}

impl RecordedOutcome {
    /// Captures the outcome of an invocation of `command`.
    #[must_use]
    pub fn from_result(command: &str, result: &Result<String, RunError>) -> Self {
        match result {
            Ok(stdout) => Self::Ok(stdout.clone()),
            Err(err) => Self::Err(RecordedFailure::from_error(command, err)),
        }
    }

    /// Converts back into the result the runner returned.
    ///
    /// # Errors
    ///
    /// Returns the recorded failure rebuilt as a [`RunError`].
    pub fn into_result(self) -> Result<String, RunError> {
        match self {
            Self::Ok(stdout) => Ok(stdout),
            Self::Err(failure) => Err(failure.into_error()),
        }
    }
}
