//! Document model for kvdiff.
//!
//! This crate defines the tree-shaped values compared by `kvdiff-diff`.
//! Documents are nested mappings of scalars, sequences, and further mappings.
//!
//! # Key Types
//!
//! - [`Value`] — A document node (null, bool, int, float, string, sequence, mapping)
//! - [`Mapping`] — String-keyed children of a mapping node
//! - [`ValueKind`] — Runtime kind of a node, used for strict type checks

pub mod convert;
pub mod error;
pub mod kind;
pub mod value;

pub use error::TypeError;
pub use kind::ValueKind;
pub use value::{Mapping, Value};
