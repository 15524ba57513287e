//! Cassette format for recording and replaying command invocations.

pub mod format;
pub mod recorder;
pub mod replayer;
