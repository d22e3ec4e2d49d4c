//! Low-level owned buffer for array storage.
//!
//! [`RawBuffer`] owns a block of uninitialized memory sized for `cap`
//! elements of `T` and releases it on drop. It never reads, writes, or
//! drops elements: tracking which slots are live is the owner's job.
//!
//! Every `unsafe` block in this module carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use contig_core::ArrayError;

/// An owned, uninitialized allocation for `cap` values of `T`.
///
/// Holds a dangling pointer and no allocation when `cap == 0` or when
/// `T` is zero-sized. For zero-sized `T` the capacity is purely logical.
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    /// Marks ownership of `T` values for drop-check purposes.
    _marker: PhantomData<T>,
}

// SAFETY: RawBuffer owns its allocation exclusively; sending or sharing
// it is as safe as sending or sharing the `T` values it may hold.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty buffer. Does not allocate.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate room for exactly `cap` elements.
    ///
    /// Fails with `CapacityOverflow` if the byte size exceeds
    /// `isize::MAX`, or `OutOfMemory` if the allocator returns null.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, ArrayError> {
        let layout = Layout::array::<T>(cap).map_err(|_| ArrayError::CapacityOverflow)?;
        if cap == 0 || Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }
        // SAFETY: `cap > 0` and `T` is not zero-sized, so the layout has
        // a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ArrayError::OutOfMemory {
            bytes: layout.size(),
        })?;
        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    /// Number of elements this buffer can hold.
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Size of the backing allocation in bytes (zero when unallocated).
    pub(crate) fn bytes(&self) -> usize {
        mem::size_of::<T>() * self.cap
    }

    /// Whether a real allocation backs this buffer.
    pub(crate) fn is_allocated(&self) -> bool {
        self.cap != 0 && !Self::IS_ZST
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        // The same layout succeeded in `try_allocate`.
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            // SAFETY: `ptr` was returned by `alloc::alloc` with exactly
            // this layout and has not been freed.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_unallocated() {
        let buf = RawBuffer::<u64>::new();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.bytes(), 0);
        assert!(!buf.is_allocated());
    }

    #[test]
    fn allocate_reports_capacity_and_bytes() {
        let buf = RawBuffer::<u32>::try_allocate(16).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.bytes(), 64);
        assert!(buf.is_allocated());
        assert_eq!(buf.as_ptr() as usize % mem::align_of::<u32>(), 0);
    }

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buf = RawBuffer::<String>::try_allocate(0).unwrap();
        assert!(!buf.is_allocated());
    }

    #[test]
    fn zero_sized_types_never_allocate() {
        let buf = RawBuffer::<()>::try_allocate(1_000_000).unwrap();
        assert_eq!(buf.capacity(), 1_000_000);
        assert_eq!(buf.bytes(), 0);
        assert!(!buf.is_allocated());
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        let result = RawBuffer::<u64>::try_allocate(usize::MAX / 4);
        assert!(matches!(result, Err(ArrayError::CapacityOverflow)));
    }

    #[test]
    fn written_slots_read_back() {
        let mut buf = RawBuffer::<u8>::try_allocate(4).unwrap();
        // SAFETY: all four slots are in bounds of the allocation.
        unsafe {
            for i in 0..4 {
                buf.as_mut_ptr().add(i).write(i as u8 * 10);
            }
            assert_eq!(*buf.as_ptr().add(3), 30);
        }
    }
}
