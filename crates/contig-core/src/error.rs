//! Error types for contig.
//!
//! Recoverable conditions only. Precondition violations (unchecked
//! indexing past the end, `front()` on an empty array, cursor arithmetic
//! across arrays) are caller bugs and panic instead of returning here.

use std::error::Error;
use std::fmt;

use crate::id::{ArrayId, Generation};

/// Errors from array access, growth, and cursor resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A checked access named an index outside `[0, len)`.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the access.
        len: usize,
    },
    /// The global allocator returned null for a growth request.
    OutOfMemory {
        /// Size of the rejected allocation in bytes.
        bytes: usize,
    },
    /// The requested capacity does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// Growth would exceed the configured `max_capacity`.
    CapacityExceeded {
        /// Capacity, in elements, needed to satisfy the operation.
        requested: usize,
        /// The configured ceiling, in elements.
        limit: usize,
    },
    /// A cursor issued before the array's most recent reallocation or
    /// removal.
    StaleCursor {
        /// The generation encoded in the cursor.
        cursor_generation: Generation,
        /// The array's current generation.
        current_generation: Generation,
    },
    /// A cursor presented to an array that did not issue it.
    ForeignCursor {
        /// Identity of the array that issued the cursor.
        cursor_array: ArrayId,
        /// Identity of the array it was presented to.
        array: ArrayId,
    },
}

impl ArrayError {
    /// Whether this error belongs to the allocation family
    /// (`OutOfMemory`, `CapacityOverflow`, `CapacityExceeded`).
    ///
    /// Operations failing with one of these leave the array exactly as
    /// it was before the call.
    pub fn is_alloc_failure(&self) -> bool {
        matches!(
            self,
            Self::OutOfMemory { .. } | Self::CapacityOverflow | Self::CapacityExceeded { .. }
        )
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            Self::OutOfMemory { bytes } => {
                write!(f, "out of memory: failed to allocate {bytes} bytes")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, limit {limit}"
                )
            }
            Self::StaleCursor {
                cursor_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale cursor: generation {cursor_generation}, array is at {current_generation}"
                )
            }
            Self::ForeignCursor {
                cursor_array,
                array,
            } => {
                write!(
                    f,
                    "cursor from array {cursor_array} used with array {array}"
                )
            }
        }
    }
}

impl Error for ArrayError {}

/// Errors from validating an array configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A geometric growth factor below 3/2.
    GrowthFactorTooSmall {
        /// Factor numerator.
        numerator: u32,
        /// Factor denominator.
        denominator: u32,
    },
    /// A growth factor with a zero denominator.
    ZeroDenominator,
    /// A capacity ceiling of zero, which would forbid any element.
    ZeroMaxCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthFactorTooSmall {
                numerator,
                denominator,
            } => {
                write!(
                    f,
                    "growth factor {numerator}/{denominator} is below the minimum of 3/2"
                )
            }
            Self::ZeroDenominator => write!(f, "growth factor denominator is zero"),
            Self::ZeroMaxCapacity => write!(f, "max_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_family_classification() {
        assert!(ArrayError::OutOfMemory { bytes: 64 }.is_alloc_failure());
        assert!(ArrayError::CapacityOverflow.is_alloc_failure());
        assert!(ArrayError::CapacityExceeded {
            requested: 9,
            limit: 8
        }
        .is_alloc_failure());
        assert!(!ArrayError::OutOfRange { index: 3, len: 3 }.is_alloc_failure());
    }

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let msg = ArrayError::OutOfRange { index: 7, len: 5 }.to_string();
        assert_eq!(msg, "index 7 out of range for array of length 5");
    }

    #[test]
    fn stale_cursor_message() {
        let err = ArrayError::StaleCursor {
            cursor_generation: Generation(1),
            current_generation: Generation(3),
        };
        assert_eq!(
            err.to_string(),
            "stale cursor: generation 1, array is at 3"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::GrowthFactorTooSmall {
            numerator: 5,
            denominator: 4,
        };
        assert!(err.to_string().contains("5/4"));
    }
}
