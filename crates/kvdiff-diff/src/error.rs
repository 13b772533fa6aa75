//! Error types for the diff crate.

use std::fmt;

use kvdiff_types::{Value, ValueKind};

/// Which input document an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// Errors that can occur during diff operations.
///
/// Any error aborts the whole comparison; no partial report is returned.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DiffError {
    /// A root document passed to a mapping comparison was not a mapping.
    #[error("invalid input: {side} document must be a dict, got {actual}")]
    InvalidInput { side: Side, actual: ValueKind },

    /// Two numbers whose distance cannot be ordered against the tolerance.
    #[error("uncomparable values at '{key}': {old:?} and {new:?}")]
    UncomparableValue { key: String, old: Value, new: Value },

    /// The comparison configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
