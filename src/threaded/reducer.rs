//! Row-parallel `C = A * Bt` over a pre-transposed right operand.

use crate::config::MultiplyConfig;
use crate::error::{MatmulError, Result};
use crate::matrix::{Element, Matrix};
use crate::threaded::partition::partition_rows;
use crate::threaded::pool::run_partitioned;
use std::ops::Range;

/// Dot product of two equal-length rows, summed left to right from zero.
#[inline]
pub fn dot_rows<T: Element>(a_row: &[T], bt_row: &[T]) -> T {
    debug_assert_eq!(a_row.len(), bt_row.len());
    a_row
        .iter()
        .zip(bt_row)
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Fill the rows `range` of C.
///
/// `c_block` holds exactly those rows, so it is `range.len() * cols` long
/// and row `i` of C lands at `c_block[(i - range.start) * cols..]`.
pub fn multiply_chunk<T: Element>(
    a: &[T],
    bt: &[T],
    c_block: &mut [T],
    range: Range<usize>,
    cols: usize,
    common: usize,
) {
    debug_assert_eq!(c_block.len(), range.len() * cols);

    for (local, i) in range.enumerate() {
        let a_row = &a[i * common..(i + 1) * common];
        let out = &mut c_block[local * cols..(local + 1) * cols];
        for (j, cell) in out.iter_mut().enumerate() {
            *cell = dot_rows(a_row, &bt[j * common..(j + 1) * common]);
        }
    }
}

/// Multi-threaded `C = A * Bt` on raw row-major slices.
///
/// Rows of C are split with [`partition_rows`] and each worker computes its
/// own block on the [`run_partitioned`] pool. C is split into disjoint
/// `&mut` blocks before any thread starts, and the call returns only after
/// every worker has been joined. Every cell of `c` is overwritten. Only
/// workers with at least one row are started, so `workers` may be far larger
/// than `rows`.
///
/// # Arguments
///
/// * `a` - Matrix A (rows × common), row-major
/// * `bt` - Transposed matrix B^T (cols × common), row-major
/// * `c` - Matrix C (rows × cols), row-major
/// * `workers` - Worker count; 0 is treated as 1
///
/// # Errors
///
/// [`MatmulError::Spawn`] if a worker thread cannot be started. `c` is then
/// only partly written.
///
/// # Panics
///
/// Panics if the slice sizes don't match `rows`, `cols`, `common`, or if a
/// worker panics.
pub fn multiply_transposed_into<T: Element>(
    a: &[T],
    bt: &[T],
    c: &mut [T],
    rows: usize,
    cols: usize,
    common: usize,
    workers: usize,
) -> Result<()> {
    let (m, n, k) = (rows, cols, common);
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(bt.len(), n * k, "Bt: expected {}x{}={} elements", n, k, n * k);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    let partition = partition_rows(rows, workers);
    log::debug!(
        "multiply_transposed: A {}x{}, Bt {}x{} on {} workers, {} rows each",
        rows,
        common,
        cols,
        common,
        partition.workers(),
        partition.chunk()
    );

    if partition.workers() == 1 {
        multiply_chunk(a, bt, c, 0..rows, cols, common);
        return Ok(());
    }

    run_partitioned(c, partition, cols, "matmul-worker", |range, block| {
        multiply_chunk(a, bt, block, range, cols, common)
    })
}

/// `C = A * Bt` where `bt` is B already transposed.
///
/// A is `rows × common`, Bt is `cols × common`, C comes back `rows × cols`.
/// Zero-sized dimensions are fine: an empty A or Bt gives an empty C, and a
/// zero `common` gives a C full of zeros.
///
/// # Errors
///
/// [`MatmulError::ShapeMismatch`] if `a.cols() != bt.cols()`,
/// [`MatmulError::Allocation`] if C cannot be allocated,
/// [`MatmulError::Spawn`] if a worker thread cannot be started.
pub fn multiply_transposed<T: Element>(
    a: &Matrix<T>,
    bt: &Matrix<T>,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    if a.cols() != bt.cols() {
        return Err(MatmulError::ShapeMismatch {
            op: "multiply_transposed",
            left: a.cols(),
            right: bt.cols(),
        });
    }

    let (rows, common) = a.shape();
    let cols = bt.rows();
    let mut c = Matrix::zeros(rows, cols)?;

    multiply_transposed_into(
        a.as_slice(),
        bt.as_slice(),
        c.as_mut_slice(),
        rows,
        cols,
        common,
        config.worker_count(),
    )?;
    Ok(c)
}
