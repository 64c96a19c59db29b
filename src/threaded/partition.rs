//! Row partitioning for the worker pool.

use crate::config::clamp_workers;
use std::ops::Range;

/// Split `0..rows` into one contiguous range per worker.
///
/// Every worker gets `rows / workers` rows (floor). The last worker also
/// takes whatever is left over, so the ranges always cover `0..rows`
/// exactly. When `rows < workers` the leading ranges are empty and the last
/// worker ends up with everything.
///
/// A `workers` of 0 is treated as 1. Ranges are computed on demand, so a
/// huge worker count costs nothing until it is iterated.
///
/// ```
/// use matmul_bt::threaded::partition::partition_rows;
///
/// let ranges: Vec<_> = partition_rows(5, 3).collect();
/// assert_eq!(ranges, vec![0..1, 1..2, 2..5]);
///
/// let ranges: Vec<_> = partition_rows(2, 4).collect();
/// assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..2]);
/// ```
pub fn partition_rows(rows: usize, workers: usize) -> RowPartition {
    let workers = clamp_workers(workers).get();
    RowPartition {
        rows,
        workers,
        chunk: rows / workers,
        next: 0,
    }
}

/// Iterator over the row range of each worker, in worker order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    rows: usize,
    workers: usize,
    chunk: usize,
    next: usize,
}

impl RowPartition {
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rows per worker before the last one takes the remainder.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// Range of worker `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= workers`.
    pub fn range(&self, t: usize) -> Range<usize> {
        assert!(t < self.workers, "worker {} out of {}", t, self.workers);
        let start = t * self.chunk;
        let end = if t == self.workers - 1 {
            self.rows
        } else {
            start + self.chunk
        };
        start..end
    }

    /// `(worker, range)` for every worker that has rows to do.
    ///
    /// With `chunk == 0` only the last worker can own rows, so the empty
    /// leading workers are skipped without being visited.
    pub fn non_empty(self) -> impl Iterator<Item = (usize, Range<usize>)> {
        let first = if self.chunk == 0 {
            self.workers - 1
        } else {
            0
        };
        (first..self.workers)
            .map(move |t| (t, self.range(t)))
            .filter(|(_, r)| !r.is_empty())
    }
}

impl Iterator for RowPartition {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next == self.workers {
            return None;
        }
        let range = self.range(self.next);
        self.next += 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.workers - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RowPartition {}
