//! Parallel dense matrix multiplication: transpose once, then split rows.
//!
//! Multiplying `A * B` row by row walks B down its columns, which is the
//! slow direction in row-major memory. Transposing B first turns every
//! inner loop into a dot product of two contiguous rows. The rows of C are
//! then split across worker threads that each own a disjoint block of the
//! output, so no locking is needed.
//!
//! ## Usage
//!
//! ```
//! use matmul_bt::{Matrix, MultiplyConfig, multiply};
//!
//! let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
//!
//! let c = multiply(&a, &b, &MultiplyConfig::default()).unwrap();
//! assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
//! ```
//!
//! If B is already transposed, or you want to reuse one transpose for many
//! multiplications, call the reducer directly:
//!
//! ```
//! use matmul_bt::{Matrix, MultiplyConfig, multiply_transposed, transpose};
//!
//! let a = Matrix::from_fn(64, 32, |i, j| (i + j) as f64).unwrap();
//! let b = Matrix::from_fn(32, 48, |i, j| (i * j) as f64).unwrap();
//!
//! let config = MultiplyConfig::default().with_workers(4);
//! let bt = transpose(&b, &config).unwrap();
//! let c = multiply_transposed(&a, &bt, &config).unwrap();
//! assert_eq!(c.shape(), (64, 48));
//! ```
//!
//! ## What's inside
//!
//! - Flat row-major `Matrix<T>` over any `num::Num` element
//! - Sequential and parallel transpose
//! - Row-partitioned reducer on scoped threads
//! - Naive i-j-k reference for testing

pub mod config;
pub mod error;
pub mod matrix;
pub mod threaded;

pub use config::MultiplyConfig;
pub use error::{MatmulError, Result};
pub use matrix::naive::{matmul_naive, multiply_naive};
pub use matrix::{Element, Matrix};
pub use threaded::partition::partition_rows;
pub use threaded::reducer::{multiply_transposed, multiply_transposed_into};

/// Transpose `src` into a new `cols × rows` matrix.
///
/// Runs across `config.worker_count()` threads when
/// `config.parallel_transpose` is set, sequentially otherwise.
pub fn transpose<T: Element>(src: &Matrix<T>, config: &MultiplyConfig) -> Result<Matrix<T>> {
    matrix::transpose::transpose_with(src, config)
}

/// Matrix multiply: C = A * B
///
/// A is `m × k`, B is `k × n`, C comes back `m × n`. B is transposed once,
/// the rows of C are computed in parallel, and the transposed copy is
/// dropped before returning.
///
/// # Errors
///
/// [`MatmulError::ShapeMismatch`] if `a.cols() != b.rows()`,
/// [`MatmulError::Allocation`] if B^T or C cannot be allocated.
pub fn multiply<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    if a.cols() != b.rows() {
        return Err(MatmulError::ShapeMismatch {
            op: "multiply",
            left: a.cols(),
            right: b.rows(),
        });
    }

    let bt = transpose(b, config)?;
    multiply_transposed(a, &bt, config)
}
