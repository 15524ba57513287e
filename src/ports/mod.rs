//! Port traits defining external boundaries.
//!
//! The only boundary is process execution. Implementations live in
//! `src/adapters/`.

pub mod runner;

pub use runner::CommandRunner;
