//! Growth counters for a single array.
//!
//! [`GrowthStats`] records every buffer replacement an array performs,
//! so callers can observe the cost of a workload and tests can check
//! that growth stays amortized.

use std::fmt;

/// Cumulative allocation counters for one array.
///
/// Updated on every buffer replacement, including the first allocation
/// out of the empty state. `clear()` does not reset them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Number of buffers allocated over the array's lifetime.
    pub reallocations: u64,
    /// Total number of live elements relocated into new buffers.
    pub elements_moved: u64,
    /// Total bytes requested from the allocator.
    pub bytes_allocated: u64,
}

impl GrowthStats {
    pub(crate) fn record(&mut self, moved: usize, bytes: usize) {
        self.reallocations += 1;
        self.elements_moved += moved as u64;
        self.bytes_allocated += bytes as u64;
    }
}

impl fmt::Display for GrowthStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reallocations, {} elements moved, {} bytes allocated",
            self.reallocations, self.elements_moved, self.bytes_allocated
        )
    }
}
