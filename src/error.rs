//! Error type for the matrix API.
//!
//! The slice-level functions keep the assert-on-precondition style and
//! panic on bad lengths. Everything that takes a [`Matrix`](crate::Matrix)
//! reports through [`MatmulError`] instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatmulError {
    /// The reduction dimensions of the two operands disagree.
    #[error("{op}: reduction dimension mismatch ({left} vs {right})")]
    ShapeMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },
    #[error("buffer length {got} does not match {rows}x{cols} (expected {expected})")]
    BufferLength {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    /// `rows * cols` overflowed or the allocator refused the reservation.
    #[error("cannot allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },
    /// The OS would not start a worker thread. Workers that did start have
    /// been joined, but the output is incomplete.
    #[error("cannot start worker {worker}: {reason}")]
    Spawn { worker: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, MatmulError>;
