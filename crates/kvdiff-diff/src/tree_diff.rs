//! Tree-level diff: walk two mappings in lock-step and classify every key path.
//!
//! Traversal keeps an explicit queue of pending frames, one per pair of
//! mappings still to be compared, instead of recursing. Each frame carries
//! the key path of the mapping it covers.
//!
//! # Invariants
//!
//! - A path in the ignore set never reaches any report bucket.
//! - In value mode the subtree under an ignored path is never visited.
//! - Each frame holds strict subtrees of its parent, so traversal terminates
//!   on any finite acyclic input.

use std::collections::VecDeque;

use tracing::{debug, trace};

use kvdiff_types::{Mapping, Value};

use crate::config::ComparerConfig;
use crate::error::DiffResult;
use crate::path::{join_path, IgnoreSet};
use crate::report::{ChangeRecord, DiffReport, KeyReport};
use crate::sequence::{diff_sequences_at, numbers_within};

/// A pair of mappings waiting to be compared.
struct Frame<'a> {
    old: &'a Mapping,
    new: &'a Mapping,
    prefix: String,
}

impl<'a> Frame<'a> {
    fn root(old: &'a Mapping, new: &'a Mapping) -> Self {
        Self {
            old,
            new,
            prefix: String::new(),
        }
    }

    /// Paths of keys present only in `new`, minus ignored ones.
    fn added_paths<'s>(&'s self, ignore: &'s IgnoreSet) -> impl Iterator<Item = String> + 's {
        one_sided_paths(&self.prefix, self.new, self.old, ignore)
    }

    /// Paths of keys present only in `old`, minus ignored ones.
    fn removed_paths<'s>(&'s self, ignore: &'s IgnoreSet) -> impl Iterator<Item = String> + 's {
        one_sided_paths(&self.prefix, self.old, self.new, ignore)
    }

    /// Keys present on both sides with their full paths and value pairs.
    fn shared(&self) -> impl Iterator<Item = (String, &'a Value, &'a Value)> + '_ {
        let new = self.new;
        self.old.iter().filter_map(move |(key, old_value)| {
            new.get(key)
                .map(|new_value| (join_path(&self.prefix, key), old_value, new_value))
        })
    }
}

fn one_sided_paths<'s>(
    prefix: &'s str,
    side: &'s Mapping,
    other: &'s Mapping,
    ignore: &'s IgnoreSet,
) -> impl Iterator<Item = String> + 's {
    side.keys()
        .filter(move |key| !other.contains_key(*key))
        .map(move |key| join_path(prefix, key))
        .filter(move |path| !ignore.contains(path))
}

/// Compare two mappings value by value.
///
/// Keys only in `new` are `added`, keys only in `old` are `removed`. Shared
/// keys holding two mappings are descended into; every other shared key is
/// classified as `common` or produces one [`ChangeRecord`] in `modified`.
///
/// # Errors
///
/// [`DiffError::InvalidConfig`] for an out-of-range tolerance, and
/// [`DiffError::UncomparableValue`] when two numbers on a shared path, or
/// inside a shared sequence, are `NaN` apart. That includes a `NaN` compared
/// with itself, so a document holding `NaN` cannot be diffed against itself.
///
/// [`DiffError::InvalidConfig`]: crate::error::DiffError::InvalidConfig
/// [`DiffError::UncomparableValue`]: crate::error::DiffError::UncomparableValue
pub fn diff_values(
    old: &Mapping,
    new: &Mapping,
    config: &ComparerConfig,
) -> DiffResult<DiffReport> {
    config.validate()?;

    let mut report = DiffReport::new();
    let mut pending = VecDeque::from([Frame::root(old, new)]);

    while let Some(frame) = pending.pop_front() {
        trace!(prefix = %frame.prefix, "comparing mapping values");

        report.added.extend(frame.added_paths(&config.ignore_keys));
        report.removed.extend(frame.removed_paths(&config.ignore_keys));

        for (path, old_value, new_value) in frame.shared() {
            if config.ignore_keys.contains(&path) {
                continue;
            }
            match (old_value, new_value) {
                (Value::Mapping(old_map), Value::Mapping(new_map)) => {
                    pending.push_back(Frame {
                        old: old_map,
                        new: new_map,
                        prefix: path,
                    });
                }
                (Value::Sequence(old_seq), Value::Sequence(new_seq)) => {
                    let diff =
                        diff_sequences_at(&path, old_seq, new_seq, config.numeric_tolerance)?;
                    if diff.is_empty() {
                        report.common.push(path);
                    } else {
                        report.modified.push(ChangeRecord::List {
                            key: path,
                            added: diff.added,
                            removed: diff.removed,
                        });
                    }
                }
                _ => classify_leaf(path, old_value, new_value, config, &mut report)?,
            }
        }
    }

    debug!(
        added = report.added.len(),
        removed = report.removed.len(),
        modified = report.modified.len(),
        common = report.common.len(),
        "value comparison complete"
    );
    Ok(report)
}

/// Leaf policy for a shared path that is not a mapping or sequence pair.
///
/// Strict kind mismatch wins over numeric tolerance, which wins over plain
/// equality.
fn classify_leaf(
    path: String,
    old: &Value,
    new: &Value,
    config: &ComparerConfig,
    report: &mut DiffReport,
) -> DiffResult<()> {
    let (old_kind, new_kind) = (old.kind(), new.kind());

    if config.strict_types && old_kind != new_kind {
        report.modified.push(ChangeRecord::Type {
            key: path,
            old_type: old_kind,
            new_type: new_kind,
        });
        return Ok(());
    }

    let equal = if old.is_numeric() && new.is_numeric() {
        numbers_within(&path, old, new, config.numeric_tolerance)?
    } else {
        old == new
    };

    if equal {
        report.common.push(path);
    } else {
        report.modified.push(ChangeRecord::Value {
            key: path,
            old_value: old.clone(),
            new_value: new.clone(),
        });
    }
    Ok(())
}

/// Compare only the key structure of two mappings.
///
/// Every shared, non-ignored path is `common` whatever its values are.
/// Shared keys holding two mappings are descended into. With
/// `descend_ignored`, an ignored mapping pair is still descended into so its
/// children are judged against the ignore set individually.
pub fn diff_keys(old: &Mapping, new: &Mapping, config: &ComparerConfig) -> KeyReport {
    let ignore = &config.ignore_keys;
    let mut report = KeyReport::new();
    let mut pending = VecDeque::from([Frame::root(old, new)]);

    while let Some(frame) = pending.pop_front() {
        trace!(prefix = %frame.prefix, "comparing mapping keys");

        report.added.extend(frame.added_paths(ignore));
        report.removed.extend(frame.removed_paths(ignore));

        for (path, old_value, new_value) in frame.shared() {
            let ignored = ignore.contains(&path);
            if ignored && !config.descend_ignored {
                continue;
            }
            if !ignored {
                report.common.push(path.clone());
            }
            if let (Value::Mapping(old_map), Value::Mapping(new_map)) = (old_value, new_value) {
                pending.push_back(Frame {
                    old: old_map,
                    new: new_map,
                    prefix: path,
                });
            }
        }
    }

    debug!(
        added = report.added.len(),
        removed = report.removed.len(),
        common = report.common.len(),
        "key comparison complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChangeType;
    use serde_json::json;

    fn map(json: serde_json::Value) -> Mapping {
        match Value::try_from(json).unwrap() {
            Value::Mapping(map) => map,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    fn sorted(mut paths: Vec<String>) -> Vec<String> {
        paths.sort();
        paths
    }

    #[test]
    fn empty_mappings_no_diff() {
        let report = diff_values(&Mapping::new(), &Mapping::new(), &ComparerConfig::default())
            .unwrap();
        assert!(report.is_empty());
        assert!(report.common.is_empty());
    }

    #[test]
    fn added_and_removed_root_keys() {
        let old = map(json!({"name": "John", "age": 30}));
        let new = map(json!({"name": "John", "email": "j@example.com"}));

        let report = diff_values(&old, &new, &ComparerConfig::default()).unwrap();
        assert_eq!(report.added, vec!["email"]);
        assert_eq!(report.removed, vec!["age"]);
        assert!(report.modified.is_empty());
        assert_eq!(report.common, vec!["name"]);
    }

    #[test]
    fn nested_paths_are_dotted() {
        let old = map(json!({"user": {"details": {"age": 30, "city": "Springfield"}}}));
        let new = map(json!({"user": {"details": {"age": 31, "state": "IL"}}}));

        let report = diff_values(&old, &new, &ComparerConfig::default()).unwrap();
        assert_eq!(report.added, vec!["user.details.state"]);
        assert_eq!(report.removed, vec!["user.details.city"]);
        assert_eq!(
            report.modified,
            vec![ChangeRecord::Value {
                key: "user.details.age".into(),
                old_value: Value::Int(30),
                new_value: Value::Int(31),
            }]
        );
    }

    #[test]
    fn mapping_paths_not_recorded_themselves() {
        let old = map(json!({"address": {"city": "Springfield"}}));
        let report = diff_values(&old, &old, &ComparerConfig::default()).unwrap();
        assert_eq!(report.common, vec!["address.city"]);
    }

    #[test]
    fn strict_type_mismatch_beats_numeric_equality() {
        let old = map(json!({"n": 1}));
        let new = map(json!({"n": 1.0}));
        let config = ComparerConfig::default().with_numeric_tolerance(10.0);

        let report = diff_values(&old, &new, &config).unwrap();
        assert_eq!(report.modified.len(), 1);
        assert_eq!(report.modified[0].change_type(), ChangeType::Type);
    }

    #[test]
    fn lenient_types_compare_numbers() {
        let old = map(json!({"n": 1, "s": "1"}));
        let new = map(json!({"n": 1.0, "s": 1}));

        let report = diff_values(&old, &new, &ComparerConfig::lenient()).unwrap();
        assert_eq!(report.common, vec!["n"]);
        assert_eq!(
            report.modified,
            vec![ChangeRecord::Value {
                key: "s".into(),
                old_value: Value::from("1"),
                new_value: Value::Int(1),
            }]
        );
    }

    #[test]
    fn mapping_vs_scalar_is_type_change() {
        let old = map(json!({"cfg": {"debug": true}}));
        let new = map(json!({"cfg": "debug"}));

        let report = diff_values(&old, &new, &ComparerConfig::default()).unwrap();
        assert_eq!(
            report.modified,
            vec![ChangeRecord::Type {
                key: "cfg".into(),
                old_type: kvdiff_types::ValueKind::Mapping,
                new_type: kvdiff_types::ValueKind::String,
            }]
        );
    }

    #[test]
    fn mapping_vs_scalar_lenient_is_value_change() {
        let old = map(json!({"cfg": {"debug": true}}));
        let new = map(json!({"cfg": null}));

        let report = diff_values(&old, &new, &ComparerConfig::lenient()).unwrap();
        assert_eq!(report.modified.len(), 1);
        assert_eq!(report.modified[0].change_type(), ChangeType::Value);
    }

    #[test]
    fn tolerance_boundary() {
        let old = map(json!({"a": 1.0, "b": 1.0}));
        let new = map(json!({"a": 1.5, "b": 1.75}));
        let config = ComparerConfig::default().with_numeric_tolerance(0.5);

        let report = diff_values(&old, &new, &config).unwrap();
        assert_eq!(report.common, vec!["a"]);
        assert_eq!(report.modified.len(), 1);
        assert_eq!(report.modified[0].key(), "b");
    }

    #[test]
    fn equal_sequences_are_common() {
        let old = map(json!({"tags": ["a", "b"]}));
        let new = map(json!({"tags": ["b", "a"]}));

        let report = diff_values(&old, &new, &ComparerConfig::default()).unwrap();
        assert_eq!(report.common, vec!["tags"]);
        assert!(report.is_empty());
    }

    #[test]
    fn sequence_change_is_list_record() {
        let old = map(json!({"numbers": [1, 2, 3], "nested": {"list": [1.0, 2.0, 3.0]}}));
        let new = map(json!({"numbers": [2, 3, 4], "nested": {"list": [1.0, 2.1, 3.0]}}));
        let config = ComparerConfig::default().with_numeric_tolerance(0.2);

        let report = diff_values(&old, &new, &config).unwrap();
        assert!(report.added.is_empty());
        assert!(report.removed.is_empty());
        assert_eq!(
            report.modified,
            vec![ChangeRecord::List {
                key: "numbers".into(),
                added: vec![Value::Int(4)],
                removed: vec![Value::Int(1)],
            }]
        );
    }

    #[test]
    fn ignored_shared_key_skipped() {
        let old = map(json!({"name": "John", "age": 30}));
        let new = map(json!({"name": "John", "age": 31}));
        let config = ComparerConfig::default().with_ignore_keys(["age"]);

        let report = diff_values(&old, &new, &config).unwrap();
        assert!(report.is_empty());
        assert!(!report.common.contains(&"age".to_string()));
    }

    #[test]
    fn ignored_parent_subtree_not_visited() {
        let old = map(json!({"meta": {"gen": 1, "old_only": true}}));
        let new = map(json!({"meta": {"gen": 2, "new_only": true}}));
        let config = ComparerConfig::default().with_ignore_keys(["meta"]);

        let report = diff_values(&old, &new, &config).unwrap();
        assert!(report.is_empty());
        assert!(report.common.is_empty());
    }

    #[test]
    fn ignored_added_and_removed_paths() {
        let old = map(json!({"a": {"x": 1}}));
        let new = map(json!({"a": {"y": 1}}));
        let config = ComparerConfig::default().with_ignore_keys(["a.x", "a.y"]);

        let report = diff_values(&old, &new, &config).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn ignore_is_exact_not_prefix() {
        let old = map(json!({"user": {"name": "a"}}));
        let new = map(json!({"user": {"name": "b"}}));
        let config = ComparerConfig::default().with_ignore_keys(["user.na", "name"]);

        let report = diff_values(&old, &new, &config).unwrap();
        assert_eq!(report.modifications(), 1);
    }

    #[test]
    fn nan_leaf_is_uncomparable() {
        let mut old = Mapping::new();
        old.insert("x".into(), Value::Float(f64::NAN));
        let mut new = Mapping::new();
        new.insert("x".into(), Value::Float(1.0));

        let err = diff_values(&old, &new, &ComparerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::DiffError::UncomparableValue { ref key, .. } if key == "x"
        ));
    }

    #[test]
    fn nan_leaf_against_itself_is_uncomparable() {
        let doc = Value::from_toml_str("x = nan\ny = 1").unwrap();
        let Value::Mapping(doc) = doc else {
            panic!("toml root must be a mapping");
        };

        let err = diff_values(&doc, &doc, &ComparerConfig::lenient()).unwrap_err();
        match err {
            crate::error::DiffError::UncomparableValue { key, old, new } => {
                assert_eq!(key, "x");
                assert!(matches!(old, Value::Float(f) if f.is_nan()));
                assert!(matches!(new, Value::Float(f) if f.is_nan()));
            }
            other => panic!("expected UncomparableValue, got {:?}", other),
        }
    }

    #[test]
    fn invalid_tolerance_rejected_before_traversal() {
        let config = ComparerConfig::default().with_numeric_tolerance(-1.0);
        assert!(diff_values(&Mapping::new(), &Mapping::new(), &config).is_err());
    }

    #[test]
    fn deeply_nested_leaf_path() {
        let mut old = Value::Int(0);
        let mut new = Value::Int(1);
        for _ in 0..500 {
            old = [("k", old)].into_iter().collect();
            new = [("k", new)].into_iter().collect();
        }
        let (Value::Mapping(old), Value::Mapping(new)) = (&old, &new) else {
            panic!("root must be a mapping");
        };

        let report = diff_values(old, new, &ComparerConfig::default()).unwrap();
        assert_eq!(report.modifications(), 1);
        assert_eq!(report.modified[0].key().split('.').count(), 500);
    }

    #[test]
    fn keys_common_ignores_values() {
        let old = map(json!({"name": "John", "address": {"city": "Springfield"}}));
        let new = map(json!({"name": "Jane", "address": {"city": "Shelbyville", "zip": "12345"}}));

        let report = diff_keys(&old, &new, &ComparerConfig::default());
        assert_eq!(report.added, vec!["address.zip"]);
        assert!(report.removed.is_empty());
        assert_eq!(sorted(report.common), vec!["address", "address.city", "name"]);
    }

    #[test]
    fn keys_mapping_vs_scalar_not_descended() {
        let old = map(json!({"a": {"x": 1}}));
        let new = map(json!({"a": 5}));

        let report = diff_keys(&old, &new, &ComparerConfig::default());
        assert!(report.is_empty());
        assert_eq!(report.common, vec!["a"]);
    }

    #[test]
    fn keys_ignored_parent_skipped_by_default() {
        let old = map(json!({"a": {"x": 1}}));
        let new = map(json!({"a": {"x": 2, "y": 3}}));
        let config = ComparerConfig::default().with_ignore_keys(["a"]);

        let report = diff_keys(&old, &new, &config);
        assert!(report.added.is_empty());
        assert!(report.common.is_empty());
    }

    #[test]
    fn keys_descend_ignored_evaluates_children() {
        let old = map(json!({"a": {"x": 1, "z": 0}}));
        let new = map(json!({"a": {"x": 2, "y": 3, "z": 0}}));
        let config = ComparerConfig::default()
            .with_ignore_keys(["a", "a.z"])
            .with_descend_ignored(true);

        let report = diff_keys(&old, &new, &config);
        assert_eq!(report.added, vec!["a.y"]);
        assert_eq!(report.common, vec!["a.x"]);
    }
}
