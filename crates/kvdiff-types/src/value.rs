//! Tree-shaped document values.
//!
//! A [`Value`] is a closed tagged union over the node shapes a key-value
//! document can contain. Equality is structural: two mappings are equal when
//! they hold the same keys with equal children, regardless of insertion
//! order. Floats follow IEEE semantics, so `NaN` is never equal to anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::ValueKind;

/// Children of a mapping node, keyed by string.
pub type Mapping = BTreeMap<String, Value>;

/// A single document node.
///
/// Serializes to (and deserializes from) the plain shape of the data, so a
/// `Value` round-trips through JSON as ordinary JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// An empty mapping node.
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// The runtime kind of this node.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` for `Int` and `Float` nodes.
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Numeric value widened to `f64`, or `None` for non-numeric nodes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Structural equality that compares numbers by value across kinds.
    ///
    /// `Int(1)` equals `Float(1.0)` here, at any depth inside sequences and
    /// mappings. Every other pair follows `==`, so `NaN` still never matches.
    pub fn loose_eq(&self, other: &Value) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let equal = match (a, b) {
                (Self::Sequence(xs), Self::Sequence(ys)) => {
                    xs.len() == ys.len() && {
                        pending.extend(xs.iter().zip(ys));
                        true
                    }
                }
                (Self::Mapping(xs), Self::Mapping(ys)) => {
                    xs.len() == ys.len()
                        && xs.keys().eq(ys.keys())
                        && {
                            pending.extend(xs.values().zip(ys.values()));
                            true
                        }
                }
                (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                    *i as f64 == *f
                }
                _ => a == b,
            };
            if !equal {
                return false;
            }
        }
        true
    }

    /// Look up a dotted key path, descending through mappings only.
    ///
    /// Returns `None` when any segment is missing or an intermediate node is
    /// not a mapping.
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| node.as_mapping()?.get(segment))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
