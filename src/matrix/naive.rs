use crate::error::{MatmulError, Result};
use crate::matrix::{Element, Matrix};

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation. It's slow because
/// the innermost loop accesses B with stride `n` (column-wise), causing
/// cache misses on every iteration.
///
/// Use this as a correctness baseline, not for performance. Each cell is
/// summed from zero in increasing `p`, the same order the parallel reducer
/// uses, so float results match bit for bit.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten (C = A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            for p in 0..k {
                sum = sum + a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

/// [`matmul_naive`] on matrices: A (m × k) times B (k × n).
pub fn multiply_naive<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    if a.cols() != b.rows() {
        return Err(MatmulError::ShapeMismatch {
            op: "multiply_naive",
            left: a.cols(),
            right: b.rows(),
        });
    }

    let mut c = Matrix::zeros(a.rows(), b.cols())?;
    matmul_naive(
        a.as_slice(),
        b.as_slice(),
        c.as_mut_slice(),
        a.rows(),
        b.cols(),
        a.cols(),
    );
    Ok(c)
}
