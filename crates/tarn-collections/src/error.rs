//! Collection error types.

use std::error::Error;
use std::fmt;

use tarn_pool::PoolError;

/// Errors returned by [`PooledList`](crate::PooledList) and
/// [`PooledQueue`](crate::PooledQueue) operations.
///
/// Every error is detected before the collection is modified, so a failed
/// call leaves contents, size and version exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionError {
    /// An index or index/count pair falls outside the logical range.
    IndexOutOfRange {
        /// The offending index (or end of the requested range).
        index: usize,
        /// Logical length at the time of the call.
        len: usize,
    },
    /// A malformed argument, such as a count whose sum with the current
    /// size overflows, or a capacity below the current size.
    InvalidArgument {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// `dequeue`/`peek` on an empty queue.
    EmptyCollection,
    /// The pool could not supply a backing array for growth.
    OutOfMemory {
        /// Number of elements that were requested from the pool.
        requested: usize,
    },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::EmptyCollection => write!(f, "collection is empty"),
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not grow to {requested} elements")
            }
        }
    }
}

impl Error for CollectionError {}

impl From<PoolError> for CollectionError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::OutOfMemory { requested } | PoolError::CapacityOverflow { requested } => {
                Self::OutOfMemory { requested }
            }
            PoolError::InvalidConfig { reason } => Self::InvalidArgument { reason },
        }
    }
}
