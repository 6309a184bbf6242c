//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while renting backing arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The allocator could not satisfy the request.
    OutOfMemory {
        /// Number of elements requested.
        requested: usize,
    },
    /// The requested length cannot be represented as an allocation
    /// (byte size overflows `isize::MAX`).
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
    /// A [`PoolConfig`](crate::PoolConfig) failed validation.
    InvalidConfig {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not rent array of {requested} elements")
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements cannot be allocated")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid pool config: {reason}")
            }
        }
    }
}

impl Error for PoolError {}
