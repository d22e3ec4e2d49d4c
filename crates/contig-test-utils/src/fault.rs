//! Allocation fault injection.
//!
//! [`FaultInjectingAllocator`] wraps [`System`] and returns null for
//! allocations of one armed byte size. Install it as the global allocator
//! of a test binary, then arm it with [`fail_allocations_of`]:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: FaultInjectingAllocator = FaultInjectingAllocator;
//!
//! let _guard = fail_allocations_of(8 * std::mem::size_of::<Big>());
//! assert!(array.try_reserve(8).is_err());
//! ```
//!
//! Matching on an exact size keeps unrelated allocations (test harness
//! output, other threads) working while the fault is armed. Pick element
//! types with unusual sizes so the armed size is unique.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Armed byte size; 0 means disarmed.
static FAIL_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Number of allocations refused since process start.
static INJECTED: AtomicUsize = AtomicUsize::new(0);

/// Serializes arming across concurrently running tests.
static ARM_LOCK: Mutex<()> = Mutex::new(());

/// A [`GlobalAlloc`] that delegates to [`System`] unless armed.
pub struct FaultInjectingAllocator;

// SAFETY: every request is either forwarded unchanged to `System` or
// refused with null, which the `GlobalAlloc` contract permits.
unsafe impl GlobalAlloc for FaultInjectingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let armed = FAIL_SIZE.load(Ordering::SeqCst);
        if armed != 0 && layout.size() == armed {
            INJECTED.fetch_add(1, Ordering::SeqCst);
            return ptr::null_mut();
        }
        // SAFETY: forwarded with the caller's layout.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` came from `System.alloc` with this layout.
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// Keeps a fault armed; disarms on drop.
pub struct FaultGuard {
    _lock: MutexGuard<'static, ()>,
}

impl Drop for FaultGuard {
    fn drop(&mut self) {
        FAIL_SIZE.store(0, Ordering::SeqCst);
    }
}

/// Refuse every allocation of exactly `bytes` bytes until the returned
/// guard is dropped.
///
/// Blocks while another guard is alive. `bytes` must be non-zero.
pub fn fail_allocations_of(bytes: usize) -> FaultGuard {
    assert!(bytes != 0, "cannot arm a fault for zero-byte allocations");
    let lock = ARM_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    FAIL_SIZE.store(bytes, Ordering::SeqCst);
    FaultGuard { _lock: lock }
}

/// Total allocations refused so far.
pub fn injected_faults() -> usize {
    INJECTED.load(Ordering::SeqCst)
}
