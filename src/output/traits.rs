//! Failure reporting interface
//!
//! Workers never surface per-page failures through the result channel.
//! Instead each failure is handed to a reporter and the worker moves on.
//! Reporters are shared across workers, so they must be thread-safe, and
//! they must not block: a slow reporter would stall the worker calling it.

use crate::crawler::Task;
use crate::{FailureKind, FetchError};
use std::sync::Mutex;

/// Receives per-task fetch failures from workers
pub trait FailureReporter: Send + Sync {
    /// Records that `task` failed on `worker` with `error`
    fn report(&self, worker: usize, task: &Task, error: &FetchError);
}

/// Default reporter: one `warn` log line per failure
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, worker: usize, task: &Task, error: &FetchError) {
        tracing::warn!(
            worker,
            id = task.id,
            kind = error.kind().as_str(),
            "{}",
            error
        );
    }
}

/// A failure captured by [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFailure {
    pub worker: usize,
    pub id: u64,
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Reporter that logs like [`LogReporter`] and also keeps every failure
///
/// Useful for callers that want to inspect failures after the sweep.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    failures: Mutex<Vec<RecordedFailure>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded failures in report order
    pub fn failures(&self) -> Vec<RecordedFailure> {
        match self.failures.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FailureReporter for MemoryReporter {
    fn report(&self, worker: usize, task: &Task, error: &FetchError) {
        LogReporter.report(worker, task, error);

        let failure = RecordedFailure {
            worker,
            id: task.id,
            url: task.url.clone(),
            kind: error.kind(),
            message: error.to_string(),
        };

        // A push cannot leave the vec half-written, so poison is ignored.
        match self.failures.lock() {
            Ok(mut guard) => guard.push(failure),
            Err(poisoned) => poisoned.into_inner().push(failure),
        }
    }
}
