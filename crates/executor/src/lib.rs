//! Bounded-concurrency fan-out executor.
//!
//! Runs N independent async tasks with a concurrency ceiling, preserving
//! per-task result order and isolating individual task failures. Workers
//! share a monotonically increasing cursor over task indices: each worker
//! claims the next unclaimed index, awaits that task, and records its
//! outcome at that index, so output order matches input order no matter
//! which task settles first.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::Error;
use futures::future::join_all;
use parking_lot::Mutex;

/// The settled outcome of one task.
///
/// A rejection carries the task's error without ever crossing a task
/// boundary as a panic or aborting its siblings.
#[derive(Debug)]
pub enum Outcome<T, E> {
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled(_))
    }

    pub fn into_fulfilled(self) -> Option<T> {
        match self {
            Outcome::Fulfilled(v) => Some(v),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&E> {
        match self {
            Outcome::Fulfilled(_) => None,
            Outcome::Rejected(e) => Some(e),
        }
    }
}

/// Run `tasks` with at most `limit` in flight at once.
///
/// Returns one [`Outcome`] per task, positionally aligned with the input.
/// `limit = 1` is strictly sequential in input order; `limit >= n` is an
/// effectively parallel launch. A `limit` of zero is a programming error
/// and fails fast with [`Error::InvalidInput`].
pub async fn run_bounded<T, E, F>(tasks: Vec<F>, limit: usize) -> Result<Vec<Outcome<T, E>>, Error>
where
    F: Future<Output = Result<T, E>>,
{
    if limit == 0 {
        return Err(Error::InvalidInput(
            "concurrency limit must be at least 1".into(),
        ));
    }

    let n = tasks.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    // Task and result slots are indexed; the cursor hands each index to
    // exactly one worker, so every slot has a single writer.
    let slots: Vec<Mutex<Option<F>>> = tasks.into_iter().map(|t| Mutex::new(Some(t))).collect();
    let results: Vec<Mutex<Option<Outcome<T, E>>>> = (0..n).map(|_| Mutex::new(None)).collect();
    let cursor = AtomicUsize::new(0);

    let workers = (0..limit.min(n)).map(|_| {
        let slots = &slots;
        let results = &results;
        let cursor = &cursor;
        async move {
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= n {
                    break;
                }
                let Some(task) = slots[index].lock().take() else {
                    continue;
                };
                let outcome = match task.await {
                    Ok(value) => Outcome::Fulfilled(value),
                    Err(reason) => Outcome::Rejected(reason),
                };
                *results[index].lock() = Some(outcome);
            }
        }
    });
    join_all(workers).await;

    Ok(results
        .into_iter()
        .map(|slot| {
            slot.into_inner()
                .expect("every claimed index records exactly one outcome")
        })
        .collect())
}
