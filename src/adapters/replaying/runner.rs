//! Replaying adapter for the `CommandRunner` port.

use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use crate::cassette::format::{RecordedInput, RecordedOutcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RunError;
use crate::invocation::Invocation;
use crate::ports::CommandRunner;

/// Replays recorded invocation results from a cassette.
///
/// No process is spawned and nothing is echoed; results are served in the
/// order they were recorded, separately for `run` and `run_silent`.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Loads the cassette at `path` and replays it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        CassetteReplayer::load(path).map(Self::new)
    }
}

impl CommandRunner for ReplayingCommandRunner {
    fn execute(&self, invocation: &Invocation) -> Result<String, RunError> {
        let interaction = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_invocation(invocation.entry_point())
        };
        match serde_json::from_value::<RecordedInput>(interaction.input) {
            Ok(recorded) if recorded == RecordedInput::from(invocation) => {}
            Ok(recorded) => warn!(
                seq = interaction.seq,
                expected = %recorded.command,
                expected_args = ?recorded.args,
                actual = %invocation.command,
                actual_args = ?invocation.args,
                "replayed interaction was recorded for a different invocation"
            ),
            Err(err) => warn!(seq = interaction.seq, error = %err, "unreadable recorded input"),
        }
        let outcome: RecordedOutcome = serde_json::from_value(interaction.output)
            .unwrap_or_else(|e| panic!("malformed runner output at seq={}: {e}", interaction.seq));
        outcome.into_result()
    }
}
