//! Structural diff engine for key-value documents.
//!
//! Compares two tree-shaped documents and reports which dotted key paths were
//! added, removed, or modified. Traversal uses an explicit work list, so
//! document depth never grows the call stack.
//!
//! # Key Types
//!
//! - [`Comparer`] -- Reusable comparer holding a default [`ComparerConfig`]
//! - [`DiffReport`] / [`ChangeRecord`] -- Value-mode report (added/removed/modified/common)
//! - [`KeyReport`] -- Key-mode report (added/removed/common)
//! - [`SequenceDiff`] -- Added/removed elements between two sequences
//! - [`IgnoreSet`] -- Exact key paths excluded from comparison

pub mod api;
pub mod comparer;
pub mod config;
pub mod error;
pub mod path;
pub mod report;
pub mod sequence;
pub mod tree_diff;

pub use api::{
    compare_keys, compare_keys_default, compare_sequences, compare_values,
    compare_values_default,
};
pub use comparer::Comparer;
pub use config::ComparerConfig;
pub use error::{DiffError, DiffResult, Side};
pub use path::{join_path, IgnoreSet};
pub use report::{ChangeRecord, ChangeType, DiffReport, KeyReport, SequenceDiff};
pub use sequence::diff_sequences;
pub use tree_diff::{diff_keys, diff_values};

pub use kvdiff_types::{Mapping, Value, ValueKind};
