//! Worker pool
//!
//! A fixed number of workers share one task receiver. Each worker fetches
//! the tasks it wins, sends successes into a shared results channel and
//! hands failures to the configured reporter. A single completion watcher
//! joins every worker and then closes the results channel; no worker ever
//! closes it.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::Extractor;
use crate::crawler::task::{PageResult, Task};
use crate::output::{FailureReporter, SweepStats};
use crate::ConfigError;
use async_channel::{Receiver, Sender};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;

/// State every worker needs, shared behind one `Arc`
struct WorkerContext {
    client: Client,
    extractor: Extractor,
    reporter: Arc<dyn FailureReporter>,
    stats: Arc<SweepStats>,
}

/// A fixed-size pool of fetch workers
pub struct WorkerPool {
    concurrency: usize,
    client: Client,
    extractor: Extractor,
    reporter: Arc<dyn FailureReporter>,
    stats: Arc<SweepStats>,
}

impl WorkerPool {
    /// Creates a pool of `concurrency` workers
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `concurrency` is zero, since no
    /// worker would ever drain the task channel.
    pub fn new(
        client: Client,
        extractor: Extractor,
        concurrency: usize,
        reporter: Arc<dyn FailureReporter>,
    ) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::Validation(
                "worker pool needs at least one worker".to_string(),
            ));
        }

        Ok(Self {
            concurrency,
            client,
            extractor,
            reporter,
            stats: Arc::new(SweepStats::new()),
        })
    }

    /// Replaces the pool's statistics counters with a shared set
    pub fn with_stats(mut self, stats: Arc<SweepStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Counters updated by this pool's workers
    pub fn stats(&self) -> Arc<SweepStats> {
        Arc::clone(&self.stats)
    }

    /// Starts the workers and the completion watcher
    ///
    /// Returns the results receiver immediately. It yields results in
    /// arrival order and closes once `tasks` has been closed upstream and
    /// every worker has finished its last task. Must be called from within
    /// a tokio runtime.
    pub fn run(&self, tasks: Receiver<Task>) -> Receiver<PageResult> {
        let (results_tx, results_rx) = async_channel::bounded(1);
        let context = Arc::new(WorkerContext {
            client: self.client.clone(),
            extractor: self.extractor.clone(),
            reporter: Arc::clone(&self.reporter),
            stats: Arc::clone(&self.stats),
        });

        let mut workers = JoinSet::new();
        for index in 0..self.concurrency {
            tracing::info!("Worker: {}", index);
            workers.spawn(run_worker(
                index,
                tasks.clone(),
                results_tx.clone(),
                Arc::clone(&context),
            ));
        }

        tokio::spawn(watch_completion(workers, results_tx));

        results_rx
    }
}

/// Joins every worker, then closes the results channel exactly once
async fn watch_completion(mut workers: JoinSet<()>, results: Sender<PageResult>) {
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Worker exited abnormally: {}", e);
        }
    }

    results.close();
    tracing::debug!("All workers finished, results channel closed");
}

/// One worker: pull, fetch, forward or report, until the task channel closes
async fn run_worker(
    index: usize,
    tasks: Receiver<Task>,
    results: Sender<PageResult>,
    context: Arc<WorkerContext>,
) {
    tracing::debug!(worker = index, "Worker started");

    while let Ok(task) = tasks.recv().await {
        tracing::debug!(worker = index, id = task.id, "Fetching {}", task.url);
        context.stats.record_attempt();

        let fetched = fetch_page(
            &context.client,
            &context.extractor,
            &task.url,
            task.id,
            index,
        )
        .await;

        match fetched {
            Ok(result) => {
                context.stats.record_success();
                if results.send(result).await.is_err() {
                    tracing::warn!(worker = index, "Results channel closed, worker stopping");
                    break;
                }
            }
            Err(e) => {
                context.stats.record_failure(e.kind());
                context.reporter.report(index, &task, &e);
            }
        }
    }

    tracing::debug!(worker = index, "Worker finished");
}
