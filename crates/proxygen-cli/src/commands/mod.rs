//! Command implementations for the proxygen CLI.
//!
//! Each command builds its options, runs the orchestrator and prints the
//! result in the requested output format.

pub mod common;
pub mod completions;
pub mod generate;
pub mod remove;
