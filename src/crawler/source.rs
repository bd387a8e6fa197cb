//! Task source
//!
//! Enumerates page ids and hands each rendered task to the worker pool over
//! a channel of capacity one, so the producer never runs more than a single
//! task ahead of the consumers. Closing the channel is the only end-of-work
//! signal downstream sees.

use crate::crawler::task::Task;
use crate::url::UrlTemplate;
use async_channel::Receiver;

/// Spawns the producer and returns the receiving end of the task channel
///
/// Emits ids `start, start + 1, ..., start + length - 1` in order, then
/// closes the channel. With `length == 0` the channel is closed before any
/// task is sent. Must be called from within a tokio runtime.
pub fn generate(template: UrlTemplate, start: u64, length: u64) -> Receiver<Task> {
    let (tx, rx) = async_channel::bounded(1);

    tokio::spawn(async move {
        let end = start.saturating_add(length);
        tracing::debug!("Task source emitting ids {}..{}", start, end);

        for id in start..end {
            let task = Task {
                url: template.render(id),
                id,
            };

            if tx.send(task).await.is_err() {
                tracing::warn!("Task channel closed by consumers at id {}", id);
                break;
            }
        }

        tx.close();
        tracing::debug!("Task source exhausted");
    });

    rx
}
