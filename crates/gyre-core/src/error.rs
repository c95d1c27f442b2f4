//! Error types for element access on a [`RingBuffer`](crate::RingBuffer).
//!
//! A full ring is not an error: appends report a zero count instead.

/// Ring buffer access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// `front`/`back` called on a ring with no elements.
    #[error("ring buffer is empty")]
    Empty,

    /// Logical index outside `[0, len)`.
    #[error("index {index} out of range for ring buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = core::result::Result<T, RingError>;
