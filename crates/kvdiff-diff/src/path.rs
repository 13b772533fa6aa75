//! Dotted key paths and the exact-match ignore set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Separator between nested mapping keys in a key path.
pub const PATH_SEPARATOR: char = '.';

/// Extend `prefix` with `key`. Root-level keys have no leading separator.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        let mut path = String::with_capacity(prefix.len() + 1 + key.len());
        path.push_str(prefix);
        path.push(PATH_SEPARATOR);
        path.push_str(key);
        path
    }
}

/// A set of key paths excluded from comparison.
///
/// Membership is exact string equality: ignoring `user` does not ignore
/// `user.name`, and there is no prefix or glob matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet {
    paths: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` is ignored.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Add a path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}
