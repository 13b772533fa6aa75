//! Functional entry points.
//!
//! Each function builds a one-off [`ComparerConfig`] from its arguments and
//! runs a single comparison. Use [`Comparer`] to reuse a configuration.

use kvdiff_types::Value;

use crate::comparer::Comparer;
use crate::config::ComparerConfig;
use crate::error::DiffResult;
use crate::report::{DiffReport, KeyReport, SequenceDiff};

/// Full value comparison of two mapping documents.
pub fn compare_values<I, S>(
    old: &Value,
    new: &Value,
    strict_types: bool,
    ignore_keys: I,
    numeric_tolerance: f64,
) -> DiffResult<DiffReport>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ComparerConfig::default()
        .with_strict_types(strict_types)
        .with_ignore_keys(ignore_keys)
        .with_numeric_tolerance(numeric_tolerance);
    Comparer::new(config).compare(old, new)
}

/// [`compare_values`] with strict types, no ignored keys, and zero tolerance.
pub fn compare_values_default(old: &Value, new: &Value) -> DiffResult<DiffReport> {
    Comparer::with_defaults().compare(old, new)
}

/// Key-structure comparison of two mapping documents.
///
/// `strict_types` has no effect on key comparison; it is accepted so both
/// entry points take the same leading arguments.
pub fn compare_keys<I, S>(
    old: &Value,
    new: &Value,
    strict_types: bool,
    ignore_keys: I,
) -> DiffResult<KeyReport>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ComparerConfig::default()
        .with_strict_types(strict_types)
        .with_ignore_keys(ignore_keys);
    Comparer::new(config).compare_keys(old, new)
}

/// [`compare_keys`] with no ignored keys.
pub fn compare_keys_default(old: &Value, new: &Value) -> DiffResult<KeyReport> {
    Comparer::with_defaults().compare_keys(old, new)
}

/// Membership comparison of two sequences.
pub fn compare_sequences(
    old: &[Value],
    new: &[Value],
    numeric_tolerance: f64,
) -> DiffResult<SequenceDiff> {
    Comparer::new(ComparerConfig::default().with_numeric_tolerance(numeric_tolerance))
        .compare_sequences(old, new)
}
