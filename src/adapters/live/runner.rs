//! Live command runner using `std::process::Command`.

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::{debug, warn};

use crate::echo;
use crate::error::RunError;
use crate::invocation::Invocation;
use crate::ports::runner::CommandRunner;
use crate::relay::{relay, SharedSink};

/// Live runner that spawns real child processes.
///
/// The console sinks default to the process' own stdout and stderr; tests
/// swap them for in-memory buffers with [`LiveCommandRunner::with_console`].
pub struct LiveCommandRunner<O = io::Stdout, E = io::Stderr> {
    stdout: Mutex<O>,
    stderr: Mutex<E>,
}

impl LiveCommandRunner {
    /// Creates a runner relaying to this process' stdout and stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(io::stdout(), io::stderr())
    }
}

impl Default for LiveCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write + Send, E: Write + Send> LiveCommandRunner<O, E> {
    /// Creates a runner relaying to the given sinks.
    #[must_use]
    pub fn with_console(stdout: O, stderr: E) -> Self {
        Self { stdout: Mutex::new(stdout), stderr: Mutex::new(stderr) }
    }

    /// Consumes the runner and hands back its console sinks.
    #[must_use]
    pub fn into_console(self) -> (O, E) {
        (
            self.stdout.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.stderr.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn echo(&self, invocation: &Invocation) {
        let mut out = self.stdout.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = echo::write_echo(&mut *out, &invocation.command, &invocation.args) {
            debug!(command = %invocation.command, error = %err, "failed to echo command line");
        }
    }
}

/// Relays an optional child pipe into a shared console sink.
fn relay_into<R: Read, W: Write>(pipe: Option<R>, sink: &Mutex<W>) -> io::Result<Vec<u8>> {
    match pipe {
        Some(pipe) => relay(pipe, &mut SharedSink(sink)),
        None => Ok(Vec::new()),
    }
}

impl<O: Write + Send, E: Write + Send> CommandRunner for LiveCommandRunner<O, E> {
    fn execute(&self, invocation: &Invocation) -> Result<String, RunError> {
        let command = &invocation.command;
        let entries = invocation.env_entries().map_err(|err| RunError::Start {
            command: command.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, err),
        })?;

        if invocation.show_logs {
            self.echo(invocation);
        }

        let mut cmd = Command::new(command);
        cmd.args(&invocation.args).stdin(Stdio::null());
        for entry in &entries {
            cmd.env(&entry.key, &entry.value);
        }
        if invocation.show_logs {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        debug!(%command, args = ?invocation.args, show_logs = invocation.show_logs, "spawning");
        let mut child = cmd.spawn().map_err(|source| {
            warn!(%command, error = %source, "spawn failed");
            RunError::Start { command: command.clone(), source }
        })?;

        let (stdout_result, stderr_result) = if invocation.show_logs {
            let stdout_pipe = child.stdout.take();
            let stderr_pipe = child.stderr.take();
            thread::scope(|scope| {
                let stdout_relay = scope.spawn(|| relay_into(stdout_pipe, &self.stdout));
                let stderr_result = relay_into(stderr_pipe, &self.stderr);
                let stdout_result = stdout_relay
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdout relay panicked")));
                (stdout_result, stderr_result)
            })
        } else {
            (Ok(Vec::new()), Ok(Vec::new()))
        };

        let status = child.wait().map_err(|err| {
            warn!(%command, error = %err, "wait failed");
            RunError::Exit { command: command.clone(), code: None }
        })?;
        if !status.success() {
            debug!(%command, code = ?status.code(), "exited unsuccessfully");
            return Err(RunError::Exit { command: command.clone(), code: status.code() });
        }

        match (stdout_result, stderr_result) {
            (Ok(stdout), Ok(_stderr)) => {
                debug!(%command, bytes = stdout.len(), "completed");
                Ok(String::from_utf8_lossy(&stdout).into_owned())
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(%command, error = %err, "relay failed");
                Err(RunError::Capture)
            }
        }
    }
}
