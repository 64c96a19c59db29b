//! Knobs for a multiplication.

use std::num::NonZeroUsize;
use std::thread;

/// How a multiplication should be run.
///
/// The default uses every core the platform reports and a sequential
/// transpose, which is what the benchmark driver does unless told
/// otherwise.
///
/// ```
/// use matmul_bt::MultiplyConfig;
///
/// let config = MultiplyConfig::default().with_workers(4).with_parallel_transpose(true);
/// assert_eq!(config.worker_count(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiplyConfig {
    /// Fixed worker count. `None` means available parallelism.
    pub workers: Option<usize>,
    /// Split the transpose of B across the same number of workers.
    pub parallel_transpose: bool,
}

impl MultiplyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_parallel_transpose(mut self, enabled: bool) -> Self {
        self.parallel_transpose = enabled;
        self
    }

    /// Resolved worker count, never below 1.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(w) => w.max(1),
            None => available_workers(),
        }
    }
}

/// Platform parallelism, clamped to at least one worker.
pub fn available_workers() -> usize {
    match thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(err) => {
            log::debug!("available_parallelism unavailable ({err}), using 1 worker");
            1
        }
    }
}

/// Clamp a raw worker count the way the partitioner expects it.
pub(crate) fn clamp_workers(workers: usize) -> NonZeroUsize {
    NonZeroUsize::new(workers).unwrap_or_else(|| {
        log::debug!("worker count 0 clamped to 1");
        NonZeroUsize::MIN
    })
}
