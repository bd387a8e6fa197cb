//! Output module for reporting sweep progress
//!
//! This module handles:
//! - Reporting per-page failures from workers
//! - Counting attempts, successes and failures
//! - Summarising a finished sweep

pub mod stats;
mod traits;

pub use stats::{print_statistics, StatsSnapshot, SweepStats};
pub use traits::{FailureReporter, LogReporter, MemoryReporter, RecordedFailure};
