//! Cancellation for one-shot work outside the poll loop.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Run `work` unless `cancel` fires first.
///
/// Returns `None` when cancelled; `work` is dropped at its current await
/// point. An already cancelled token wins over ready work.
pub async fn until_cancelled<F>(cancel: &CancellationToken, work: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = work => Some(output),
    }
}
