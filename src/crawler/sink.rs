//! Result sink
//!
//! Drains the results channel on the caller's task, reporting each result
//! in the order it arrives. Returning is the signal that the whole sweep
//! has finished.

use crate::crawler::task::PageResult;
use async_channel::Receiver;

/// Logs every result until the channel is closed and empty
///
/// # Returns
///
/// The number of results reported
pub async fn drain(results: Receiver<PageResult>) -> usize {
    drain_with(results, |result| tracing::info!("{}", result)).await
}

/// Hands every result to `report` until the channel is closed and empty
pub async fn drain_with<F>(results: Receiver<PageResult>, mut report: F) -> usize
where
    F: FnMut(&PageResult),
{
    let mut count = 0;
    while let Ok(result) = results.recv().await {
        report(&result);
        count += 1;
    }
    count
}

/// Collects every result in arrival order
pub async fn collect(results: Receiver<PageResult>) -> Vec<PageResult> {
    let mut collected = Vec::new();
    drain_with(results, |result| collected.push(result.clone())).await;
    collected
}
