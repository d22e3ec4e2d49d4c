//! Core types for the contig container workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the storage core and its cursors: error
//! types, array identity and generation IDs, and the growth policy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;
pub mod id;

pub use error::{ArrayError, ConfigError};
pub use growth::GrowthPolicy;
pub use id::{ArrayId, Generation};
