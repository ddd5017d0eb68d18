/* src/partial.rs */

//! Run independent fallible operations concurrently and keep whatever
//! succeeded. A failed operation never affects its siblings.

use std::fmt::Display;
use std::future::Future;
use std::thread;

use futures_util::future::join_all;
use tracing::{debug, warn};

/// Poll every future concurrently on the current task and wait for all of
/// them. Slot `i` of the output is `Some` only if future `i` succeeded.
pub async fn settle_all<I, F, T, E>(operations: I) -> Vec<Option<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    join_all(operations)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| settle(index, outcome))
        .collect()
}

/// Run every closure on its own scoped thread and wait for all of them.
/// A panicking closure is reported as a failed slot.
pub fn settle_all_blocking<I, F, T, E>(operations: I) -> Vec<Option<T>>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: Display + Send,
{
    thread::scope(|scope| {
        let handles: Vec<_> = operations
            .into_iter()
            .map(|operation| scope.spawn(operation))
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| match handle.join() {
                Ok(outcome) => settle(index, outcome),
                Err(_) => {
                    warn!(index, "operation panicked");
                    None
                }
            })
            .collect()
    })
}

fn settle<T, E: Display>(index: usize, outcome: Result<T, E>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(index, error = %e, "operation failed");
            None
        }
    }
}
