//! Command-line support for the GhostStack planner.
//!
//! This crate provides:
//! - JSON loaders for box manifests and placement event logs
//! - Replay of recorded placement events through a planning session
//! - Session reports for printing and saving

mod parser;
mod report;
mod runner;

pub use parser::{InputParser, ParseError};
pub use report::SessionReport;
pub use runner::replay_events;
