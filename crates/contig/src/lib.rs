//! contig: a contiguous growable array with random-access cursors.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut numbers = DynArray::new();
//! assert_eq!((numbers.size(), numbers.capacity()), (0, 0));
//!
//! for n in 1..=5 {
//!     numbers.push_back(n);
//! }
//! assert_eq!(numbers.size(), 5);
//! assert!(numbers.capacity() >= 5);
//! assert_eq!((*numbers.front(), *numbers.back()), (1, 5));
//!
//! // Walk the array with a cursor.
//! let mut cursor = numbers.begin();
//! let mut seen = Vec::new();
//! while cursor != numbers.end() {
//!     seen.push(*cursor.get(&numbers)?);
//!     cursor.advance();
//! }
//! assert_eq!(seen, [1, 2, 3, 4, 5]);
//!
//! // Checked access reports out-of-range indices.
//! assert_eq!(numbers.at(5), Err(ArrayError::OutOfRange { index: 5, len: 5 }));
//!
//! let capacity = numbers.capacity();
//! numbers.clear();
//! assert!(numbers.empty());
//! assert_eq!(numbers.capacity(), capacity);
//! # Ok::<(), ArrayError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `contig-array` | `DynArray`, `Cursor`, `IntoIter`, `ArrayConfig`, `GrowthStats` |
//! | [`types`] | `contig-core` | Errors, `ArrayId`, `Generation`, `GrowthPolicy` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Array storage and cursors (`contig-array`).
///
/// [`array::DynArray`] and [`array::Cursor`] are also available in the
/// [`prelude`].
pub use contig_array as array;

/// Core types: errors, IDs, and growth policy (`contig-core`).
pub use contig_core as types;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_array::{ArrayConfig, Cursor, DynArray, GrowthStats};
    pub use contig_core::{ArrayError, ConfigError, GrowthPolicy};
}
