//! Fan-out / fan-in over independent checks.

use futures::future::join_all;
use std::future::Future;
use tracing::debug;

/// Runs every task concurrently and waits until all of them settled.
///
/// Returns every success value in order when nothing failed; otherwise
/// every failure in order, with the successful slots dropped. No task is
/// cancelled early, whatever its siblings do.
pub async fn settle_all<I, F, T, E>(tasks: I) -> Result<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let outcomes = join_all(tasks).await;
    let total = outcomes.len();

    let mut values = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(value) => values.push(value),
            Err(error) => failures.push(error),
        }
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        debug!(failed = failures.len(), total, "sibling checks rejected");
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn delayed(ms: u64, outcome: Result<u32, &'static str>) -> Result<u32, &'static str> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        outcome
    }

    #[tokio::test]
    async fn all_successes_in_declaration_order() {
        let result = settle_all(vec![delayed(30, Ok(1)), delayed(0, Ok(2)), delayed(10, Ok(3))]).await;
        assert_eq!(result, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn failures_only_in_declaration_order() {
        let result = settle_all(vec![
            delayed(20, Err("first")),
            delayed(0, Ok(2)),
            delayed(5, Err("third")),
        ])
        .await;
        assert_eq!(result, Err(vec!["first", "third"]));
    }

    #[tokio::test]
    async fn every_task_runs_to_completion() {
        let finished = Arc::new(AtomicUsize::new(0));
        let tasks = (0..4u64).map(|i| {
            let finished = Arc::clone(&finished);
            async move {
                tokio::time::sleep(Duration::from_millis(i * 5)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                if i == 0 { Err(i) } else { Ok(i) }
            }
        });

        let result = settle_all(tasks).await;
        assert_eq!(result, Err(vec![0]));
        assert_eq!(finished.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn empty_input_is_success() {
        let tasks: Vec<std::future::Ready<Result<u8, ()>>> = Vec::new();
        assert_eq!(settle_all(tasks).await, Ok(vec![]));
    }
}
