//! Error types for mutex and FIFO operations

use thiserror::Error;

/// Outcome of a failed mutex operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexError {
    /// The mutex could not be taken before the timeout expired
    #[error("Mutex not acquired before timeout")]
    Timeout,

    /// Release of a mutex that is not held
    #[error("Mutex release failed")]
    ReleaseFailed,

    /// No mutex behind the handle (absent or already deleted)
    #[error("Mutex handle is null")]
    NullPointer,
}

/// Outcome of a failed FIFO operation.
///
/// `Full` and `Empty` are expected conditions, not faults. `Timeout`
/// means lock contention, never lack of space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoError {
    /// No free slot
    #[error("FIFO is full")]
    Full,

    /// No item to read
    #[error("FIFO is empty")]
    Empty,

    /// Guard not acquired before timeout
    #[error("FIFO guard not acquired before timeout")]
    Timeout,

    /// Guard handle is null (deleted mutex)
    #[error("FIFO guard handle is null")]
    NullPointer,

    /// Guard could not be released
    #[error("FIFO guard release failed")]
    ReleaseFailed,

    /// Item length does not match the configured item size
    #[error("Item size mismatch: expected {expected} bytes, got {actual}")]
    ItemSize {
        /// Configured item size
        expected: usize,
        /// Length of the offered item
        actual: usize,
    },

    /// Capacity or item size of zero requested at creation
    #[error("FIFO capacity and item size must be non-zero")]
    ZeroCapacity,

    /// Requested buffer does not fit in memory
    #[error("FIFO of {capacity} items of {item_size} bytes exceeds addressable memory")]
    TooLarge { item_size: usize, capacity: usize },
}

impl From<MutexError> for FifoError {
    fn from(e: MutexError) -> Self {
        match e {
            MutexError::Timeout => FifoError::Timeout,
            MutexError::ReleaseFailed => FifoError::ReleaseFailed,
            MutexError::NullPointer => FifoError::NullPointer,
        }
    }
}

/// Result type for FIFO operations
pub type FifoResult<T> = Result<T, FifoError>;
