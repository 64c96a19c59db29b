use crate::config::MultiplyConfig;
use crate::error::Result;
use crate::matrix::{Element, Matrix};
use crate::threaded::partition::partition_rows;
use crate::threaded::pool::run_partitioned;

/// Transpose a matrix: dst = src^T
///
/// Converts from row-major (rows × cols) to row-major (cols × rows).
/// After transpose, what was column j of src becomes row j of dst.
///
/// # Arguments
///
/// * `src` - Source matrix (rows × cols), row-major
/// * `dst` - Destination matrix (cols × rows), row-major
/// * `rows` - Number of rows in src
/// * `cols` - Number of columns in src
///
/// # Panics
///
/// Panics if either slice is not exactly `rows * cols` long.
///
/// # Example
///
/// ```
/// use matmul_bt::matrix::transpose::transpose;
///
/// let src = vec![1, 2, 3,   // 2×3 matrix
///                4, 5, 6];
/// let mut dst = vec![0; 6];  // will be 3×2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1, 4,   // 3×2 matrix
///                      2, 5,
///                      3, 6]);
/// ```
pub fn transpose<T: Copy>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    check_lengths(src, dst, rows, cols);

    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Same as [`transpose`] but splits the destination rows across `workers`
/// threads.
///
/// Destination row `j` is source column `j`, so each worker owns a
/// contiguous block of `dst` and only reads `src`.
///
/// # Errors
///
/// [`MatmulError::Spawn`](crate::MatmulError::Spawn) if a worker thread
/// cannot be started.
pub fn transpose_parallel<T: Copy + Send + Sync>(
    src: &[T],
    dst: &mut [T],
    rows: usize,
    cols: usize,
    workers: usize,
) -> Result<()> {
    check_lengths(src, dst, rows, cols);

    let partition = partition_rows(cols, workers);
    if partition.workers() == 1 || rows == 0 {
        transpose(src, dst, rows, cols);
        return Ok(());
    }

    run_partitioned(dst, partition, rows, "transpose-worker", |range, block| {
        for (local, j) in range.enumerate() {
            let out = &mut block[local * rows..(local + 1) * rows];
            for (i, cell) in out.iter_mut().enumerate() {
                *cell = src[i * cols + j];
            }
        }
    })
}

/// Transpose `src` into a new matrix, in parallel if `config` asks for it.
pub fn transpose_with<T: Element>(
    src: &Matrix<T>,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    if !config.parallel_transpose {
        return src.transpose();
    }

    let (rows, cols) = src.shape();
    let mut out = Matrix::zeros(cols, rows)?;
    transpose_parallel(
        src.as_slice(),
        out.as_mut_slice(),
        rows,
        cols,
        config.worker_count(),
    )?;
    Ok(out)
}

fn check_lengths<T>(src: &[T], dst: &[T], rows: usize, cols: usize) {
    assert_eq!(
        src.len(),
        rows * cols,
        "src: expected {}x{}={} elements",
        rows,
        cols,
        rows * cols
    );
    assert_eq!(
        dst.len(),
        rows * cols,
        "dst: expected {}x{}={} elements",
        cols,
        rows,
        rows * cols
    );
}
