//! Recording adapters that capture interactions to cassettes.

pub mod runner;

pub use runner::RecordingCommandRunner;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::format::RecordedOutcome;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::RunError;

/// Record a runner result using the Ok/Err JSON convention.
///
/// Mirror of `replaying::runner` - serializes the outcome for recording.
///
/// Convention:
/// - `Ok(stdout)` is serialized as `{"Ok": stdout}`
/// - `Err(e)` is serialized as `{"Err": {kind, command, code, message}}`
pub(crate) fn record_result<I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    command: &str,
    input: &I,
    result: &Result<String, RunError>,
) where
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(RecordedOutcome::from_result(command, result))
        .expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
