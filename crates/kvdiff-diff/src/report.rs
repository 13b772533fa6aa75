//! Report types produced by the diff engine.
//!
//! All reports serialize to a plain mapping of sequences and records. The
//! field names (`added`, `removed`, `modified`, `common`, `key`,
//! `change_type`, `old_type`, `new_type`, `old_value`, `new_value`) are stable.

use std::fmt;

use serde::{Deserialize, Serialize};

use kvdiff_types::{Value, ValueKind};

/// Value-mode comparison result.
///
/// Buckets are filled in discovery order. Callers should not rely on the
/// relative order of paths from different nesting levels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Key paths present only in the new document.
    pub added: Vec<String>,
    /// Key paths present only in the old document.
    pub removed: Vec<String>,
    /// One record per detected difference on a shared path.
    pub modified: Vec<ChangeRecord>,
    /// Shared leaf and sequence paths whose values compared equal.
    pub common: Vec<String>,
}

impl DiffReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing was added, removed, or modified.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of differences (additions + removals + modifications).
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn additions(&self) -> usize {
        self.added.len()
    }

    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    pub fn modifications(&self) -> usize {
        self.modified.len()
    }

    /// The change record for `key`, if that path was modified.
    pub fn change_for(&self, key: &str) -> Option<&ChangeRecord> {
        self.modified.iter().find(|c| c.key() == key)
    }

    /// Render the report as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a string, a kind name, or a `Value`; none can fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Key-mode comparison result. Values are never inspected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Every shared, non-ignored path, including mapping paths.
    pub common: Vec<String>,
}

impl KeyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if both documents have the same key structure.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.added.len()
    }

    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Elements present on only one side of a sequence comparison.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDiff {
    /// Elements of the new sequence with no match in the old one.
    pub added: Vec<Value>,
    /// Elements of the old sequence with no match in the new one.
    pub removed: Vec<Value>,
}

impl SequenceDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A single detected difference on a shared key path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change_type", rename_all = "lowercase")]
pub enum ChangeRecord {
    /// The two values have different kinds under strict typing.
    Type {
        key: String,
        old_type: ValueKind,
        new_type: ValueKind,
    },
    /// Two scalars differ (beyond tolerance, for numbers).
    Value {
        key: String,
        old_value: Value,
        new_value: Value,
    },
    /// Two sequences differ in membership.
    List {
        key: String,
        added: Vec<Value>,
        removed: Vec<Value>,
    },
}

impl ChangeRecord {
    /// The key path this change applies to.
    pub fn key(&self) -> &str {
        match self {
            Self::Type { key, .. } | Self::Value { key, .. } | Self::List { key, .. } => key,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self {
            Self::Type { .. } => ChangeType::Type,
            Self::Value { .. } => ChangeType::Value,
            Self::List { .. } => ChangeType::List,
        }
    }
}

/// Discriminant of a [`ChangeRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Type,
    Value,
    List,
}

impl ChangeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Value => "value",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
