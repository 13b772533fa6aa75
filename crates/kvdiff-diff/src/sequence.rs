//! Sequence diff: membership comparison of two ordered lists.
//!
//! Elements are matched by deep equality, with integers and floats compared
//! by value at every depth (`[1]` matches `[1.0]`). A numeric element with no
//! exact match still counts as present if some numeric element on the other
//! side lies within the tolerance. Nested mappings and sequences inside a list
//! are compared as whole values; there is no structural diff of list elements.
//!
//! Matching scans the other side for every element, so the cost is
//! O(|old| x |new|).

use tracing::trace;

use kvdiff_types::Value;

use crate::error::{DiffError, DiffResult};
use crate::report::SequenceDiff;

/// Compare two sequences and report the unmatched elements of each side.
///
/// Each unmatched occurrence is reported once, in its original order.
pub fn diff_sequences(old: &[Value], new: &[Value], tolerance: f64) -> DiffResult<SequenceDiff> {
    diff_sequences_at("", old, new, tolerance)
}

/// [`diff_sequences`] for a sequence found at `key`, used in error reports.
pub(crate) fn diff_sequences_at(
    key: &str,
    old: &[Value],
    new: &[Value],
    tolerance: f64,
) -> DiffResult<SequenceDiff> {
    let added = unmatched(key, new, old, tolerance)?;
    let removed = unmatched(key, old, new, tolerance)?;

    if !added.is_empty() || !removed.is_empty() {
        trace!(
            key,
            added = added.len(),
            removed = removed.len(),
            "sequence membership differs"
        );
    }

    Ok(SequenceDiff { added, removed })
}

/// Elements of `side` that have no match in `other`.
fn unmatched(key: &str, side: &[Value], other: &[Value], tolerance: f64) -> DiffResult<Vec<Value>> {
    let mut missing = Vec::new();
    for item in side {
        if other.iter().any(|candidate| item.loose_eq(candidate)) {
            continue;
        }
        if item.is_numeric() && has_number_within(key, item, other, tolerance)? {
            continue;
        }
        missing.push(item.clone());
    }
    Ok(missing)
}

fn has_number_within(
    key: &str,
    item: &Value,
    other: &[Value],
    tolerance: f64,
) -> DiffResult<bool> {
    for candidate in other.iter().filter(|v| v.is_numeric()) {
        if numbers_within(key, item, candidate, tolerance)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns `true` if two numeric values are at most `tolerance` apart.
///
/// Two integers are compared exactly; any float widens both sides to `f64`.
/// A distance that is `NaN` cannot be ordered and yields
/// [`DiffError::UncomparableValue`]. Non-numeric inputs are never within
/// tolerance.
pub(crate) fn numbers_within(
    key: &str,
    old: &Value,
    new: &Value,
    tolerance: f64,
) -> DiffResult<bool> {
    let distance = match (old, new) {
        (Value::Int(a), Value::Int(b)) => (i128::from(*a) - i128::from(*b)).unsigned_abs() as f64,
        _ => match (old.as_f64(), new.as_f64()) {
            (Some(a), Some(b)) if a == b => return Ok(true),
            (Some(a), Some(b)) => (a - b).abs(),
            _ => return Ok(false),
        },
    };

    if distance.is_nan() {
        return Err(DiffError::UncomparableValue {
            key: key.to_owned(),
            old: old.clone(),
            new: new.clone(),
        });
    }
    Ok(distance <= tolerance)
}
