//! Flat row-major matrix storage, the transpose, and a naive reference.
//!
//! A matrix is one contiguous buffer plus its shape. Element `(i, j)` lives
//! at offset `i * cols + j`, so a row is a plain slice and the multiply
//! kernel can walk two rows side by side.

pub mod naive;
pub mod transpose;

use crate::error::{MatmulError, Result};
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

/// Numeric element stored in a [`Matrix`].
///
/// Anything `num::Num` that can cross threads by copy qualifies, so `i32`,
/// `i64`, `f32` and `f64` all work out of the box.
pub trait Element: num::Num + Copy + Send + Sync + Debug + 'static {}

impl<T> Element for T where T: num::Num + Copy + Send + Sync + Debug + 'static {}

/// A dense `rows × cols` matrix in row-major order.
///
/// ```
/// use matmul_bt::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(m[(1, 0)], 4);
/// assert_eq!(m.row(0), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MatmulError::BufferLength`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatmulError::BufferLength {
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Zero-filled matrix.
    ///
    /// The buffer is reserved up front with `try_reserve_exact`, so an
    /// impossible size comes back as [`MatmulError::Allocation`] instead of
    /// aborting the process.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatmulError::Allocation { rows, cols })?;
        data.resize(len, T::zero());
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix by calling `f(i, j)` for every cell in row-major order.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let len = element_count(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatmulError::Allocation { rows, cols })?;
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice of `cols` elements.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {} out of bounds ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Sequential transpose into a freshly allocated `cols × rows` matrix.
    pub fn transpose(&self) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(self.cols, self.rows)?;
        transpose::transpose(&self.data, &mut out.data, self.rows, self.cols);
        Ok(out)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatmulError::Allocation { rows, cols })
}
