//! Adapters implementing the [`CommandRunner`](crate::ports::CommandRunner) port.

pub mod live;
pub mod recording;
pub mod replaying;
