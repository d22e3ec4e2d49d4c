//! Forced allocation failures leave arrays untouched.
//!
//! This binary installs [`FaultInjectingAllocator`] as its global
//! allocator. An armed fault applies to the whole process, so every case
//! runs in sequence from a single test and no other test in this binary
//! allocates concurrently. Element types use odd sizes so the
//! armed byte count does not collide with unrelated allocations.

use std::mem::size_of;

use contig::prelude::*;
use contig_test_utils::{
    fail_allocations_of, injected_faults, DropCounter, FaultInjectingAllocator, Tracked,
};

#[global_allocator]
static ALLOC: FaultInjectingAllocator = FaultInjectingAllocator;

/// 296 bytes.
type Block = [u64; 37];

fn block(n: u64) -> Block {
    [n; 37]
}

fn failed_push_keeps_size_capacity_and_elements() {
    let mut a = DynArray::new();
    for n in 0..4 {
        a.push_back(block(n));
    }
    assert_eq!(a.capacity(), 4);
    let generation = a.generation();
    let stats = a.stats();
    let before = injected_faults();

    {
        let _fault = fail_allocations_of(8 * size_of::<Block>());
        let err = a.try_push_back(block(99)).unwrap_err();
        assert_eq!(
            err,
            ArrayError::OutOfMemory {
                bytes: 8 * size_of::<Block>()
            }
        );
    }

    assert!(injected_faults() > before);
    assert_eq!(a.size(), 4);
    assert_eq!(a.capacity(), 4);
    assert_eq!(a.generation(), generation);
    assert_eq!(a.stats(), stats);
    for (n, value) in a.iter().enumerate() {
        assert_eq!(*value, block(n as u64));
    }

    // Disarmed: the same push now succeeds.
    a.try_push_back(block(4)).unwrap();
    assert_eq!(a.size(), 5);
    assert_eq!(a.capacity(), 8);
}

fn failed_reserve_keeps_array_and_cursors() {
    let mut a: DynArray<Block> = DynArray::with_capacity(3);
    a.push_back(block(1));
    a.push_back(block(2));
    let cursor = a.begin();

    {
        let _fault = fail_allocations_of(11 * size_of::<Block>());
        assert!(matches!(
            a.try_reserve(11),
            Err(ArrayError::OutOfMemory { .. })
        ));
        assert!(DynArray::<Block>::try_with_capacity(11).is_err());
    }

    assert_eq!(a.capacity(), 3);
    assert_eq!(a.size(), 2);
    // No reallocation happened, so the cursor is still good.
    assert_eq!(*cursor.get(&a).unwrap(), block(1));

    a.try_reserve(11).unwrap();
    assert_eq!(a.capacity(), 11);
    assert!(matches!(
        cursor.get(&a),
        Err(ArrayError::StaleCursor { .. })
    ));
}

fn failed_growth_never_drops_or_duplicates_elements() {
    // Tracked<[u8; 83]> has an unusual size of its own.
    type Elem = Tracked<[u8; 83]>;
    let counter = DropCounter::new();
    let mut a: DynArray<Elem> = DynArray::new();
    for i in 0..16u8 {
        a.push_back(Tracked::new([i; 83], &counter));
    }
    assert_eq!(a.capacity(), 16);

    {
        let _fault = fail_allocations_of(32 * size_of::<Elem>());
        let rejected = Tracked::new([255; 83], &counter);
        assert!(a.try_push_back(rejected).is_err());
    }

    // Only the rejected value was dropped.
    assert_eq!(counter.drops(), 1);
    assert_eq!(a.size(), 16);
    assert_eq!(a[15].value()[0], 15);
    drop(a);
    assert_eq!(counter.drops(), 17);
}

#[test]
fn allocation_failures_leave_arrays_intact() {
    failed_push_keeps_size_capacity_and_elements();
    failed_reserve_keeps_array_and_cursors();
    failed_growth_never_drops_or_duplicates_elements();
}
