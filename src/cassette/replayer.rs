//! Serves recorded runner invocations back in order.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use tracing::debug;

use super::format::{Cassette, Interaction, RUNNER_PORT};

/// Pending invocations of a cassette, one queue per entry point.
///
/// `run` and `run_silent` calls are matched independently: a silent call
/// never consumes an interaction recorded for `run`, and vice versa.
pub struct CassetteReplayer {
    pending: HashMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queues the runner interactions of `cassette` by entry point.
    ///
    /// Interactions recorded for other ports are ignored.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: HashMap<String, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            if interaction.port != RUNNER_PORT {
                debug!(seq = interaction.seq, port = %interaction.port, "ignoring interaction");
                continue;
            }
            pending.entry(interaction.method.clone()).or_default().push_back(interaction.clone());
        }
        Self { pending }
    }

    /// Reads and parses the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Number of invocations still queued for `entry_point`.
    #[must_use]
    pub fn remaining(&self, entry_point: &str) -> usize {
        self.pending.get(entry_point).map_or(0, VecDeque::len)
    }

    /// Takes the next recorded invocation for `entry_point`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette holds no further invocation for
    /// `entry_point`, listing what is still queued for the other one.
    pub fn next_invocation(&mut self, entry_point: &str) -> Interaction {
        if let Some(interaction) = self.pending.get_mut(entry_point).and_then(VecDeque::pop_front) {
            return interaction;
        }
        let mut queued: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(method, queue)| format!("{method}: {}", queue.len()))
            .collect();
        queued.sort();
        panic!(
            "Cassette exhausted: no {entry_point:?} invocation left to replay. \
             Still queued: [{}]",
            queued.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, method: &str, stdout: &str) -> Interaction {
        Interaction {
            seq,
            port: "runner".into(),
            method: method.into(),
            input: json!({"command": "echo", "args": [stdout], "extra_env": []}),
            output: json!({"Ok": stdout}),
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), interactions }
    }

    #[test]
    fn serves_each_entry_point_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "run", "a"),
            interaction(1, "run_silent", ""),
            interaction(2, "run", "b"),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining("run"), 2);

        assert_eq!(replayer.next_invocation("run").seq, 0);
        assert_eq!(replayer.next_invocation("run_silent").seq, 1);
        let third = replayer.next_invocation("run");
        assert_eq!(third.seq, 2);
        assert_eq!(third.output, json!({"Ok": "b"}));
        assert_eq!(replayer.remaining("run"), 0);
    }

    #[test]
    fn other_ports_are_not_queued() {
        let mut foreign = interaction(0, "run", "x");
        foreign.port = "clock".into();
        let cassette = make_cassette(vec![foreign, interaction(1, "run", "a")]);
        let replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining("run"), 1);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_entry_point_panics() {
        let cassette = make_cassette(vec![interaction(0, "run", "a")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_invocation("run");
        let _ = replayer.next_invocation("run");
    }

    #[test]
    #[should_panic(expected = "Still queued: [run: 1]")]
    fn exhaustion_message_lists_what_is_left() {
        let cassette = make_cassette(vec![interaction(0, "run", "a")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_invocation("run_silent");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CassetteReplayer::load(Path::new("/nonexistent/cmdrelay.cassette.yaml"))
            .err()
            .expect("missing file must fail");
        assert!(err.contains("Failed to read cassette file"));
    }
}
