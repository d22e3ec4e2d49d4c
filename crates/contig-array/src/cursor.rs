//! Generation-checked random-access cursors.
//!
//! A [`Cursor`] is a position within one [`DynArray`], encoded as the
//! array's identity, the buffer generation it was issued in, an element
//! offset, and the array length at issue time. It holds no pointer and no borrow: resolving it needs
//! the array itself, and resolution checks identity, generation, and the
//! live range in O(1). A cursor therefore cannot dangle; misuse surfaces
//! as an [`ArrayError`] instead.
//!
//! Removing elements advances the generation, and within one generation
//! the array only grows. A cursor is dereferenceable only below the
//! length it was issued at, so an old `end()` never starts resolving to
//! an element pushed after it.
//!
//! # Preconditions
//!
//! Cursor arithmetic and ordering only make sense between cursors with
//! the same origin (same array, same generation). Violations are caller
//! bugs:
//!
//! - `a - b` across origins panics; [`Cursor::try_distance`] reports it.
//! - `partial_cmp` across origins returns `None` and `==` is `false`.
//! - Moving a cursor before offset 0 panics.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use contig_core::{ArrayError, ArrayId, Generation};

use crate::array::DynArray;

/// A position within a [`DynArray<T>`].
///
/// Cheap to copy. Advancing or retreating requires a mutable cursor
/// value; there is no way to move a cursor through a shared reference.
#[must_use]
pub struct Cursor<T> {
    array: ArrayId,
    generation: Generation,
    offset: usize,
    /// Array length when the cursor (or the cursor it was derived from)
    /// was issued.
    issued_len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(
        array: ArrayId,
        generation: Generation,
        offset: usize,
        issued_len: usize,
    ) -> Self {
        Self {
            array,
            generation,
            offset,
            issued_len,
            _marker: PhantomData,
        }
    }

    /// Element offset from the start of the array.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Identity of the issuing array.
    pub fn array_id(&self) -> ArrayId {
        self.array
    }

    /// Buffer generation the cursor was issued in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether both cursors come from the same array and generation.
    pub fn same_origin(&self, other: &Self) -> bool {
        self.array == other.array && self.generation == other.generation
    }

    /// Validate this cursor against `array` and return its index.
    fn check(&self, array: &DynArray<T>) -> Result<usize, ArrayError> {
        if self.array != array.id() {
            return Err(ArrayError::ForeignCursor {
                cursor_array: self.array,
                array: array.id(),
            });
        }
        if self.generation != array.generation() {
            return Err(ArrayError::StaleCursor {
                cursor_generation: self.generation,
                current_generation: array.generation(),
            });
        }
        let live = self.issued_len.min(array.len());
        if self.offset >= live {
            return Err(ArrayError::OutOfRange {
                index: self.offset,
                len: live,
            });
        }
        Ok(self.offset)
    }

    /// Whether [`get`](Self::get) would succeed for `array`.
    pub fn is_dereferenceable(&self, array: &DynArray<T>) -> bool {
        self.check(array).is_ok()
    }

    /// Dereference against the issuing array.
    ///
    /// Fails with `ForeignCursor` for another array, `StaleCursor` after
    /// a reallocation or removal, and `OutOfRange` at or past the end the
    /// array had when the cursor was issued.
    pub fn get<'a>(&self, array: &'a DynArray<T>) -> Result<&'a T, ArrayError> {
        let index = self.check(array)?;
        Ok(&array[index])
    }

    /// Mutably dereference against the issuing array.
    pub fn get_mut<'a>(&self, array: &'a mut DynArray<T>) -> Result<&'a mut T, ArrayError> {
        let index = self.check(array)?;
        Ok(&mut array[index])
    }

    /// Indexed access: `cursor.at(array, n)` resolves `cursor + n`.
    ///
    /// # Panics
    ///
    /// Panics if `offset() + n` is negative.
    pub fn at<'a>(&self, array: &'a DynArray<T>, n: isize) -> Result<&'a T, ArrayError> {
        (*self + n).get(array)
    }

    /// Move forward one position (pre-increment).
    pub fn advance(&mut self) -> &mut Self {
        *self += 1;
        self
    }

    /// Move back one position (pre-decrement).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at offset 0.
    pub fn retreat(&mut self) -> &mut Self {
        *self -= 1;
        self
    }

    /// Signed distance `self - other`.
    ///
    /// Fails with `ForeignCursor` if the cursors come from different
    /// arrays and `StaleCursor` if they come from different generations
    /// of the same array.
    ///
    /// # Panics
    ///
    /// Panics if the distance does not fit in `isize`.
    #[track_caller]
    pub fn try_distance(&self, other: &Self) -> Result<isize, ArrayError> {
        if self.array != other.array {
            return Err(ArrayError::ForeignCursor {
                cursor_array: other.array,
                array: self.array,
            });
        }
        if self.generation != other.generation {
            return Err(ArrayError::StaleCursor {
                cursor_generation: other.generation,
                current_generation: self.generation,
            });
        }
        let distance = if self.offset >= other.offset {
            isize::try_from(self.offset - other.offset)
        } else {
            isize::try_from(other.offset - self.offset).map(|d| -d)
        };
        match distance {
            Ok(distance) => Ok(distance),
            Err(_) => panic!(
                "cursor distance overflows isize: {} - {}",
                self.offset, other.offset
            ),
        }
    }

    #[track_caller]
    fn offset_by(self, delta: isize) -> Self {
        match self.offset.checked_add_signed(delta) {
            Some(offset) => Self { offset, ..self },
            None => panic!(
                "cursor moved out of range: offset {} by {delta}",
                self.offset
            ),
        }
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> Add<isize> for Cursor<T> {
    type Output = Self;

    #[track_caller]
    fn add(self, rhs: isize) -> Self {
        self.offset_by(rhs)
    }
}

impl<T> Sub<isize> for Cursor<T> {
    type Output = Self;

    #[track_caller]
    fn sub(self, rhs: isize) -> Self {
        match rhs.checked_neg() {
            Some(neg) => self.offset_by(neg),
            None => panic!("cursor offset delta {rhs} cannot be negated"),
        }
    }
}

impl<T> AddAssign<isize> for Cursor<T> {
    #[track_caller]
    fn add_assign(&mut self, rhs: isize) {
        *self = *self + rhs;
    }
}

impl<T> SubAssign<isize> for Cursor<T> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: isize) {
        *self = *self - rhs;
    }
}

/// Distance between two cursors of the same origin.
///
/// # Panics
///
/// Panics if the cursors have different origins; see
/// [`Cursor::try_distance`].
impl<T> Sub for Cursor<T> {
    type Output = isize;

    #[track_caller]
    fn sub(self, rhs: Self) -> isize {
        match self.try_distance(&rhs) {
            Ok(distance) => distance,
            Err(err) => panic!("cursor distance across origins: {err}"),
        }
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_origin(other) && self.offset == other.offset
    }
}

impl<T> Eq for Cursor<T> {}

/// Cursors of the same origin order by offset; cursors of different
/// origins are unordered.
impl<T> PartialOrd for Cursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_origin(other)
            .then(|| self.offset.cmp(&other.offset))
    }
}

impl<T> Hash for Cursor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.array.hash(state);
        self.generation.hash(state);
        self.offset.hash(state);
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("array", &self.array)
            .field("generation", &self.generation)
            .field("offset", &self.offset)
            .field("issued_len", &self.issued_len)
            .finish()
    }
}

impl<T> fmt::Display for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cursor(array={}, gen={}, off={})",
            self.array, self.generation, self.offset
        )
    }
}
