//! The growable contiguous array.
//!
//! [`DynArray`] pairs an owned raw buffer with a live-element count. Slots
//! `[0, len)` are initialized, slots `[len, capacity)` are not. Growth
//! follows the configured [`GrowthPolicy`](contig_core::GrowthPolicy) and
//! replaces the buffer in one step: allocate, relocate, release. A failed
//! allocation leaves the array exactly as it was.
//!
//! # Cursor invalidation
//!
//! Every buffer replacement advances the array's [`Generation`], which
//! turns all previously issued cursors stale. Operations that remove
//! elements (`clear`, `truncate`, `pop_back`) advance it too, so a cursor
//! into a removed slot never resolves to an element pushed later. Growth
//! within capacity keeps the generation; cursors remember the length they
//! were issued at and never reach past it.

#![allow(unsafe_code)]

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use contig_core::{ArrayError, ArrayId, ConfigError, Generation};

use crate::config::ArrayConfig;
use crate::cursor::Cursor;
use crate::metrics::GrowthStats;
use crate::raw::RawBuffer;

/// A contiguous, growable array of `T`.
///
/// Created empty with no allocation. `push_back` grows the buffer
/// geometrically so that N insertions cost O(N) relocations in total.
/// `clear` keeps the allocation for reuse; capacity never shrinks.
///
/// The array is not internally synchronized. It is `Send`/`Sync` exactly
/// when `T` is, and Rust's borrow rules provide the external exclusion
/// that mutation needs.
pub struct DynArray<T> {
    buf: RawBuffer<T>,
    len: usize,
    id: ArrayId,
    generation: Generation,
    config: ArrayConfig,
    stats: GrowthStats,
}

impl<T> DynArray<T> {
    /// Create an empty array with the default configuration.
    ///
    /// Does not allocate: `size() == capacity() == 0`.
    pub fn new() -> Self {
        Self::from_parts(ArrayConfig::new())
    }

    /// Create an empty array with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`ArrayConfig::validate`].
    pub fn with_config(config: ArrayConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(array) => array,
            Err(err) => panic!("invalid array config: {err}"),
        }
    }

    /// Create an empty array with a custom configuration, validating it.
    pub fn try_with_config(config: ArrayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Create an empty array with room for exactly `capacity` elements.
    ///
    /// Aborts through [`handle_alloc_error`] if the allocator fails, and
    /// panics if the byte size overflows `isize::MAX`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut array = Self::new();
        array.reserve(capacity);
        array
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        let mut array = Self::new();
        array.try_reserve(capacity)?;
        Ok(array)
    }

    fn from_parts(config: ArrayConfig) -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            id: ArrayId::next(),
            generation: Generation::default(),
            config,
            stats: GrowthStats::default(),
        }
    }

    // ── Observers ──────────────────────────────────────────────

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Number of live elements (alias of [`size`](Self::size)).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of elements the buffer holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether the array has no live elements.
    pub fn empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the array has no live elements (alias of [`empty`](Self::empty)).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Process-unique identity of this array.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// Current buffer generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The configuration this array was built with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Cumulative growth counters.
    pub fn stats(&self) -> GrowthStats {
        self.stats
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized and the pointer is
        // non-null and aligned (dangling only when len == 0).
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    // ── Element access ─────────────────────────────────────────

    /// Bounds-checked access.
    ///
    /// Returns [`ArrayError::OutOfRange`] when `index >= size()`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Access without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `size()`. Checked by `debug_assert!` only.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "get_unchecked({index}) on array of length {}",
            self.len
        );
        // SAFETY: the caller guarantees index < len.
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Mutable access without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `size()`. Checked by `debug_assert!` only.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "get_unchecked_mut({index}) on array of length {}",
            self.len
        );
        // SAFETY: the caller guarantees index < len.
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// The first element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(value) => value,
            None => panic!("front() called on an empty DynArray"),
        }
    }

    /// The first element, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(value) => value,
            None => panic!("front_mut() called on an empty DynArray"),
        }
    }

    /// The last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(value) => value,
            None => panic!("back() called on an empty DynArray"),
        }
    }

    /// The last element, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(value) => value,
            None => panic!("back_mut() called on an empty DynArray"),
        }
    }

    // ── Mutation ───────────────────────────────────────────────

    /// Append `value` at index `size()`, growing if the buffer is full.
    ///
    /// Amortized O(1). Aborts through [`handle_alloc_error`] if the
    /// allocator fails and panics on capacity overflow or when the
    /// configured ceiling is reached; use
    /// [`try_push_back`](Self::try_push_back) to handle those as errors.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            if let Err(err) = self.grow_for(1) {
                growth_failed::<T>(err);
            }
        }
        // SAFETY: len < capacity after the check above.
        unsafe { self.write_next(value) }
    }

    /// Append a clone of `value`.
    pub fn push_back_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        self.push_back(value.clone());
    }

    /// Fallible form of [`push_back`](Self::push_back).
    ///
    /// On error the array is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            self.grow_for(1)?;
        }
        // SAFETY: len < capacity after the check above.
        unsafe { self.write_next(value) }
        Ok(())
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.generation = self.generation.next();
        // SAFETY: slot `len` was live and is now outside the live range,
        // so it is read exactly once.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Ensure `capacity() >= target_capacity`.
    ///
    /// Reallocates to exactly `target_capacity` when it exceeds the
    /// current capacity; otherwise does nothing. Never shrinks. Note that
    /// the argument is a total capacity, not a count of additional slots.
    ///
    /// Aborts or panics on allocation failure like
    /// [`push_back`](Self::push_back).
    pub fn reserve(&mut self, target_capacity: usize) {
        if let Err(err) = self.try_reserve(target_capacity) {
            growth_failed::<T>(err);
        }
    }

    /// Fallible form of [`reserve`](Self::reserve).
    ///
    /// On error the array, including its capacity, is unchanged.
    pub fn try_reserve(&mut self, target_capacity: usize) -> Result<(), ArrayError> {
        if target_capacity <= self.capacity() {
            return Ok(());
        }
        if let Some(limit) = self.config.max_capacity {
            if target_capacity > limit {
                return Err(ArrayError::CapacityExceeded {
                    requested: target_capacity,
                    limit,
                });
            }
        }
        self.grow_to(target_capacity)
    }

    /// Drop every live element. Capacity is kept.
    ///
    /// Invalidates every cursor when anything was removed.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drop the elements at `[new_len, size())`. No-op if `new_len >= size()`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        self.generation = self.generation.next();
        // SAFETY: slots [new_len, new_len + tail_len) were live and are now
        // outside the live range; each is dropped exactly once.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Make room for `additional` more elements using the growth policy.
    ///
    /// Used by insertion paths. Unlike `reserve`, this over-allocates
    /// geometrically so repeated small insertions stay amortized.
    pub(crate) fn grow_for(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        let current = self.capacity();
        if required <= current {
            return Ok(());
        }
        let mut target = self.config.growth.next_capacity(current, required);
        if let Some(limit) = self.config.max_capacity {
            if required > limit {
                return Err(ArrayError::CapacityExceeded { requested: required, limit });
            }
            target = target.min(limit);
        }
        self.grow_to(target)
    }

    /// Replace the buffer with one of exactly `new_capacity` slots.
    ///
    /// Either fully succeeds or leaves the array untouched.
    fn grow_to(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        debug_assert!(new_capacity > self.capacity());
        let mut fresh = RawBuffer::try_allocate(new_capacity)?;
        // SAFETY: both buffers hold at least `len` slots and do not
        // overlap. Slots [0, len) of the old buffer are initialized; after
        // the bitwise move they are treated as uninitialized and the old
        // buffer is released without dropping anything.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        let bytes = fresh.bytes();
        drop(mem::replace(&mut self.buf, fresh));
        self.generation = self.generation.next();
        self.stats.record(self.len, bytes);
        Ok(())
    }

    /// Write `value` into slot `len` and extend the live range.
    ///
    /// # Safety
    ///
    /// `len < capacity()` must hold.
    unsafe fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: the caller guarantees slot `len` is within the buffer;
        // it is uninitialized, so nothing is overwritten.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(self.len), value) }
        self.len += 1;
    }

    // ── Cursors ────────────────────────────────────────────────

    /// Cursor to the first element (equal to [`end`](Self::end) when empty).
    pub fn begin(&self) -> Cursor<T> {
        Cursor::new(self.id, self.generation, 0, self.len)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.id, self.generation, self.len, self.len)
    }

    /// Read-only alias of [`begin`](Self::begin).
    ///
    /// Cursors never grant mutation by themselves; mutable access needs
    /// `&mut DynArray` at resolve time.
    pub fn cbegin(&self) -> Cursor<T> {
        self.begin()
    }

    /// Read-only alias of [`end`](Self::end).
    pub fn cend(&self) -> Cursor<T> {
        self.end()
    }

    /// Cursor at `offset`, which may equal `size()` (the end position).
    pub fn cursor_at(&self, offset: usize) -> Result<Cursor<T>, ArrayError> {
        if offset > self.len {
            return Err(ArrayError::OutOfRange {
                index: offset,
                len: self.len,
            });
        }
        Ok(Cursor::new(self.id, self.generation, offset, self.len))
    }

    /// Dereference a cursor issued by this array.
    pub fn resolve(&self, cursor: Cursor<T>) -> Result<&T, ArrayError> {
        cursor.get(self)
    }

    /// Mutably dereference a cursor issued by this array.
    pub fn resolve_mut(&mut self, cursor: Cursor<T>) -> Result<&mut T, ArrayError> {
        cursor.get_mut(self)
    }

    /// Move the buffer out without running `Drop`.
    ///
    /// Returns the buffer and the live length; the caller takes over
    /// responsibility for dropping elements `[0, len)`.
    pub(crate) fn into_raw_parts(self) -> (RawBuffer<T>, usize) {
        let mut me = mem::ManuallyDrop::new(self);
        let len = me.len;
        let buf = mem::replace(&mut me.buf, RawBuffer::new());
        (buf, len)
    }
}

/// Report a growth failure from an infallible entry point.
#[cold]
#[track_caller]
fn growth_failed<T>(err: ArrayError) -> ! {
    if let ArrayError::OutOfMemory { bytes } = err {
        if let Ok(layout) = Layout::from_size_align(bytes, mem::align_of::<T>()) {
            handle_alloc_error(layout);
        }
    }
    panic!("DynArray growth failed: {err}")
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: slots [0, len) are initialized and dropped exactly once
        // here; `buf` then releases the memory in its own Drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), self.len));
        }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy with a fresh identity. Capacity equals the source length.
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(self.config);
        out.reserve(self.len);
        for value in self.as_slice() {
            out.push_back(value.clone());
        }
        out
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Unchecked-contract indexing: `array[i]` requires `i < size()` and
/// panics otherwise. Use [`DynArray::at`] for a recoverable check.
impl<T, I: SliceIndex<[T]>> Index<I> for DynArray<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U> PartialEq<DynArray<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T, U> PartialEq<[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<Vec<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for DynArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynArray<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.grow_for(lower) {
            growth_failed::<T>(err);
        }
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}
