//! Proxygen CLI library.
//!
//! Exposes the orchestrator, command implementations and output formatters
//! so they can be exercised without spawning the binary.

#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod formatters;
pub mod orchestrator;

pub use orchestrator::{GenerationState, GenerationSummary, Orchestrator, RemovalSummary};
