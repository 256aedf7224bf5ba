//! First-success race over independent checks.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::future::Future;
use tracing::trace;

/// Runs every task concurrently and adopts the first success observed.
///
/// Losing branches are not cancelled: the race resolves once every task
/// settled, their outcomes are then discarded. When no task succeeds, the
/// failures are returned in declaration order.
pub async fn first_success<I, F, T, E>(tasks: I) -> Result<T, Vec<E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<_> = tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| async move { (index, task.await) })
        .collect();

    let mut winner = None;
    let mut failures = Vec::new();
    while let Some((index, outcome)) = pending.next().await {
        match outcome {
            Ok(value) if winner.is_none() => {
                trace!(branch = index, "race won");
                winner = Some(value);
            }
            Ok(_) => {}
            Err(error) => failures.push((index, error)),
        }
    }

    match winner {
        Some(value) => Ok(value),
        None => {
            failures.sort_by_key(|(index, _)| *index);
            Err(failures.into_iter().map(|(_, error)| error).collect())
        }
    }
}
