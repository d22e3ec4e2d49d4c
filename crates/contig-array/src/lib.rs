//! Growable contiguous array storage with generation-checked cursors.
//!
//! This is the only crate in the workspace that contains `unsafe` code.
//! It is confined to three modules (`raw`, `array`, `iter`), and every
//! block carries a `// SAFETY:` comment.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T> (storage core)
//! ├── RawBuffer<T>   owned, uninitialized block of `capacity` slots
//! ├── len            slots [0, len) are live
//! ├── ArrayId        process-unique identity, fresh per array and clone
//! ├── Generation     bumped on every buffer replacement or removal
//! ├── ArrayConfig    growth policy + optional capacity ceiling
//! └── GrowthStats    reallocation / relocation counters
//!
//! Cursor<T> (position)
//! └── (ArrayId, Generation, offset, issued len), resolved against &DynArray<T>
//! ```
//!
//! # Growth
//!
//! Insertions grow geometrically (doubling by default, never below 3/2)
//! so `push_back` is amortized O(1). `reserve` grows to exactly the
//! requested capacity. Reallocation is allocate-then-move: if the
//! allocation fails nothing about the array changes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod iter;
pub mod metrics;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use config::ArrayConfig;
pub use cursor::Cursor;
pub use iter::IntoIter;
pub use metrics::GrowthStats;
