//! Batch decision simulation
//!
//! Runs many independent decisions against one snapshot and tallies the
//! outcome, for tuning weights and checking the engine's distributions.

pub mod report;
pub mod runner;

pub use report::BatchReport;
pub use runner::{run_batch, BatchConfig};
