use std::fmt;

use serde::{Deserialize, Serialize};

/// The runtime kind of a document node.
///
/// Only the strict type check looks at kinds; everything else compares
/// values directly. The serialized names are stable and appear in
/// `type` change records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "str")]
    String,
    #[serde(rename = "list")]
    Sequence,
    #[serde(rename = "dict")]
    Mapping,
}

impl ValueKind {
    /// The stable, lowercase name of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "str",
            Self::Sequence => "list",
            Self::Mapping => "dict",
        }
    }

    /// Returns `true` for integer and floating-point kinds.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
