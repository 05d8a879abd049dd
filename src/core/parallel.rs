//! Parallel processing utilities

use crate::error::{PyDepTreeError, Result};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
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

/// Shared progress callback
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// Build a dedicated rayon pool with `threads` workers
pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|idx| format!("pydeptree-worker-{}", idx))
        .build()
        .map_err(|e| PyDepTreeError::ParallelExecution {
            message: format!("failed to build thread pool: {}", e),
        })
}

/// Map `f` over `items`, in parallel on `pool` when one is given
///
/// Results keep the order of `items` either way.
pub fn process_batch<T, R, F>(
    items: &[T],
    pool: Option<&ThreadPool>,
    f: F,
    progress: Option<&ProgressCallback>,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);
    let run = |item: &T| {
        let result = f(item);
        let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(callback) = progress {
            callback(ProgressUpdate::new(
                current,
                total,
                format!("Analyzing file {}/{}", current, total),
            ));
        }
        result
    };

    match pool {
        Some(pool) => pool.install(|| items.par_iter().map(run).collect()),
        None => items.iter().map(run).collect(),
    }
}
