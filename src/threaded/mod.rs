//! Multi-threaded multiplication over a transposed right operand.
//!
//! The output rows are split into one contiguous range per worker and every
//! worker writes only its own block of C. Workers are scoped threads, so the
//! operands are borrowed rather than copied, and the call returns only after
//! all of them have been joined.
//!
//! - `partition`: row ranges (floor chunk, last worker takes the remainder)
//! - `pool`: named scoped workers over those ranges, with the join barrier
//! - `reducer`: the row-dot-row kernel run on the pool

pub mod partition;
pub mod pool;
pub mod reducer;
