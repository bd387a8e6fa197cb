//! Crawler module: the concurrent fetch pipeline
//!
//! This module contains the pipeline stages and the glue that wires them:
//! - Task source enumerating page ids
//! - Worker pool fetching pages and extracting fields
//! - Result sink draining completed work
//!
//! Stages are connected by bounded `async-channel` handoffs of capacity one,
//! so a fast stage waits for a slow one instead of buffering.

mod fetcher;
mod parser;
mod pool;
mod sink;
mod source;
mod task;

pub use fetcher::{build_http_client, fetch_page};
pub use parser::Extractor;
pub use pool::WorkerPool;
pub use sink::{collect, drain, drain_with};
pub use source::generate;
pub use task::{PageResult, Task};

use crate::config::{validate_sweep_config, SweepConfig};
use crate::output::{FailureReporter, SweepStats};
use crate::url::UrlTemplate;
use crate::SweepError;
use std::sync::Arc;

/// Runs a complete sweep and logs every result
///
/// This is the main entry point. It will:
/// 1. Parse the URL template and compile the selector
/// 2. Build the HTTP client
/// 3. Start the task source and the worker pool
/// 4. Drain results on the calling task until every worker has finished
///
/// Per-page failures go to `reporter` and never abort the sweep.
///
/// # Arguments
///
/// * `config` - The sweep parameters
/// * `reporter` - Receives per-page failures
/// * `stats` - Counters updated as pages are fetched
///
/// # Returns
///
/// * `Ok(usize)` - Number of results reported
/// * `Err(SweepError)` - The sweep could not be started
pub async fn sweep(
    config: &SweepConfig,
    reporter: Arc<dyn FailureReporter>,
    stats: Arc<SweepStats>,
) -> Result<usize, SweepError> {
    let results = start(config, reporter, stats)?;
    Ok(drain(results).await)
}

/// Starts the source and pool, returning the results channel undrained
///
/// The configuration is validated first, so a bad template, worker count
/// or selector fails here rather than as per-page failures. Callers that
/// want results rather than log lines can consume the returned channel
/// with [`collect`] or [`drain_with`].
pub fn start(
    config: &SweepConfig,
    reporter: Arc<dyn FailureReporter>,
    stats: Arc<SweepStats>,
) -> Result<async_channel::Receiver<PageResult>, SweepError> {
    let template = UrlTemplate::parse(&config.url_template)?;
    validate_sweep_config(config)?;

    let extractor = Extractor::new(&config.selector)?;
    let selector = extractor.selector().to_string();
    let client = build_http_client()?;

    let pool = WorkerPool::new(client, extractor, config.workers, reporter)?.with_stats(stats);

    tracing::debug!(
        "Sweeping {} from {} for {} pages with {} workers, extracting '{}'",
        template,
        config.start,
        config.length,
        pool.concurrency(),
        selector
    );

    let tasks = generate(template, config.start, config.length);
    Ok(pool.run(tasks))
}
