//! Test utilities for contig development.
//!
//! Provides drop-tracking element types ([`DropCounter`], [`Tracked`])
//! for ownership tests, and a [`FaultInjectingAllocator`] for forcing
//! allocation failures from integration tests.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fault;

pub use fault::{fail_allocations_of, injected_faults, FaultGuard, FaultInjectingAllocator};

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared counters for drops and clones of [`Tracked`] values.
///
/// Cloning a `DropCounter` shares the same counters.
#[derive(Clone, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
    clones: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Number of tracked values cloned so far.
    pub fn clones(&self) -> usize {
        self.clones.get()
    }
}

impl fmt::Debug for DropCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropCounter")
            .field("drops", &self.drops())
            .field("clones", &self.clones())
            .finish()
    }
}

/// A value that reports its drops and clones to a [`DropCounter`].
///
/// Equality and debug output only look at the wrapped value.
pub struct Tracked<T> {
    value: T,
    counter: DropCounter,
}

impl<T> Tracked<T> {
    pub fn new(value: T, counter: &DropCounter) -> Self {
        Self {
            value,
            counter: counter.clone(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        self.counter.clones.set(self.counter.clones.get() + 1);
        Self {
            value: self.value.clone(),
            counter: self.counter.clone(),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.counter.drops.set(self.counter.drops.get() + 1);
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_drops_and_clones() {
        let counter = DropCounter::new();
        let a = Tracked::new(1, &counter);
        let b = a.clone();
        assert_eq!(counter.clones(), 1);
        assert_eq!(a, b);
        drop(a);
        drop(b);
        assert_eq!(counter.drops(), 2);
    }

    #[test]
    fn debug_shows_value_only() {
        let counter = DropCounter::new();
        let t = Tracked::new("x", &counter);
        assert_eq!(format!("{t:?}"), "Tracked(\"x\")");
    }
}
