//! Invocation requests and the extra environment entries they carry.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::InvalidEnvEntry;

/// A single environment assignment applied on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    /// Variable name. Never empty.
    pub key: String,
    /// Variable value. May be empty.
    pub value: String,
}

impl EnvEntry {
    /// Parses a `KEY=VALUE` string, splitting at the first `=`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEnvEntry`] when there is no `=` or the key is empty.
    pub fn parse(entry: &str) -> Result<Self, InvalidEnvEntry> {
        match entry.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                Ok(Self { key: key.to_string(), value: value.to_string() })
            }
            _ => Err(InvalidEnvEntry { entry: entry.to_string() }),
        }
    }
}

impl FromStr for EnvEntry {
    type Err = InvalidEnvEntry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EnvEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Everything needed to launch one child process.
///
/// Built fresh for every call and never shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path, resolved through `PATH` by the OS.
    pub command: String,
    /// Arguments passed to the program, in order.
    pub args: Vec<String>,
    /// Extra `KEY=VALUE` entries appended after the inherited environment.
    pub extra_env: Vec<String>,
    /// Echo the command line and relay both streams live.
    pub show_logs: bool,
}

impl Invocation {
    /// Creates an invocation from borrowed parts.
    #[must_use]
    pub fn new(extra_env: &[&str], command: &str, args: &[&str], show_logs: bool) -> Self {
        Self {
            command: command.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            extra_env: extra_env.iter().map(ToString::to_string).collect(),
            show_logs,
        }
    }

    /// Name of the entry point this invocation goes through.
    #[must_use]
    pub fn entry_point(&self) -> &'static str {
        if self.show_logs {
            "run"
        } else {
            "run_silent"
        }
    }

    /// Parses the extra environment entries, preserving their order.
    ///
    /// An entry without `=` names no value and cannot shadow an inherited
    /// variable, so it is skipped rather than applied as an empty value.
    ///
    /// # Errors
    ///
    /// Returns the first entry that has an empty key.
    pub fn env_entries(&self) -> Result<Vec<EnvEntry>, InvalidEnvEntry> {
        let mut entries = Vec::with_capacity(self.extra_env.len());
        for entry in &self.extra_env {
            if !entry.contains('=') {
                debug!(command = %self.command, %entry, "skipping env entry without `=`");
                continue;
            }
            entries.push(EnvEntry::parse(entry)?);
        }
        Ok(entries)
    }
}
