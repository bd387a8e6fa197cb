//! Sweep statistics
//!
//! Lock-free counters updated by workers while a sweep runs, and a
//! snapshot type for reporting once it has finished.

use crate::FailureKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by all workers of a sweep
#[derive(Debug, Default)]
pub struct SweepStats {
    attempted: AtomicU64,
    succeeded: AtomicU64,
    network: AtomicU64,
    bad_status: AtomicU64,
    rate_limited: AtomicU64,
    parse: AtomicU64,
}

impl SweepStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::Network => &self.network,
            FailureKind::BadStatus => &self.bad_status,
            FailureKind::RateLimited => &self.rate_limited,
            FailureKind::Parse => &self.parse,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            network: self.network.load(Ordering::Relaxed),
            bad_status: self.bad_status.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            parse: self.parse.load(Ordering::Relaxed),
        }
    }
}

/// Sweep statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Fetches started
    pub attempted: u64,

    /// Fetches that produced a result
    pub succeeded: u64,

    pub network: u64,
    pub bad_status: u64,
    pub rate_limited: u64,
    pub parse: u64,
}

impl StatsSnapshot {
    /// Total failures of every kind
    pub fn failed(&self) -> u64 {
        self.network + self.bad_status + self.rate_limited + self.parse
    }

    /// Count for a single failure kind
    pub fn failures_of(&self, kind: FailureKind) -> u64 {
        match kind {
            FailureKind::Network => self.network,
            FailureKind::BadStatus => self.bad_status,
            FailureKind::RateLimited => self.rate_limited,
            FailureKind::Parse => self.parse,
        }
    }

    /// Returns the success rate as a percentage of attempted fetches
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.attempted as f64) * 100.0
    }
}

/// Logs the statistics summary
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &StatsSnapshot) {
    tracing::info!(
        "Sweep finished: {} attempted, {} succeeded, {} failed ({:.1}% success)",
        stats.attempted,
        stats.succeeded,
        stats.failed(),
        stats.success_rate()
    );

    if stats.failed() > 0 {
        for kind in [
            FailureKind::Network,
            FailureKind::BadStatus,
            FailureKind::RateLimited,
            FailureKind::Parse,
        ] {
            let count = stats.failures_of(kind);
            if count > 0 {
                tracing::info!("  {}: {}", kind.as_str(), count);
            }
        }
    }
}
