//! Parallel processing utilities

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for long-running operations
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }
}

/// Map `f` over `items` on the rayon pool, reporting each completion
///
/// Results come back in input order regardless of completion order.
pub fn parallel_map_with_progress<T, F, R, P>(items: &[T], f: F, progress_callback: P) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    items
        .par_iter()
        .map(|item| {
            let result = f(item);
            let done = counter.fetch_add(1, Ordering::SeqCst) + 1;
            progress_callback(ProgressUpdate::new(
                done,
                total,
                format!("Processed {}/{}", done, total),
            ));
            result
        })
        .collect()
}
