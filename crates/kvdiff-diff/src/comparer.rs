//! Reusable comparer holding a default configuration.

use tracing::debug;

use kvdiff_types::{Mapping, Value};

use crate::config::ComparerConfig;
use crate::error::{DiffError, DiffResult, Side};
use crate::report::{DiffReport, KeyReport, SequenceDiff};
use crate::sequence::diff_sequences;
use crate::tree_diff::{diff_keys, diff_values};

/// Compares documents using a stored default [`ComparerConfig`].
///
/// The comparer holds no state besides its config, so one instance can be
/// shared freely. Changing the stored config through [`config_mut`] affects
/// every later call that does not pass its own config.
///
/// [`config_mut`]: Comparer::config_mut
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comparer {
    config: ComparerConfig,
}

impl Comparer {
    pub fn new(config: ComparerConfig) -> Self {
        Self { config }
    }

    /// A comparer with strict types, no ignored keys, and zero tolerance.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ComparerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ComparerConfig {
        &mut self.config
    }

    /// Value-mode comparison using the stored config.
    pub fn compare(&self, old: &Value, new: &Value) -> DiffResult<DiffReport> {
        self.compare_with(old, new, &self.config)
    }

    /// Value-mode comparison using `config` instead of the stored one.
    pub fn compare_with(
        &self,
        old: &Value,
        new: &Value,
        config: &ComparerConfig,
    ) -> DiffResult<DiffReport> {
        let (old, new) = mapping_roots(old, new)?;
        debug!(
            strict_types = config.strict_types,
            ignored = config.ignore_keys.len(),
            tolerance = config.numeric_tolerance,
            "comparing document values"
        );
        diff_values(old, new, config)
    }

    /// Key-mode comparison using the stored config.
    pub fn compare_keys(&self, old: &Value, new: &Value) -> DiffResult<KeyReport> {
        self.compare_keys_with(old, new, &self.config)
    }

    /// Key-mode comparison using `config` instead of the stored one.
    pub fn compare_keys_with(
        &self,
        old: &Value,
        new: &Value,
        config: &ComparerConfig,
    ) -> DiffResult<KeyReport> {
        let (old, new) = mapping_roots(old, new)?;
        debug!(ignored = config.ignore_keys.len(), "comparing document keys");
        Ok(diff_keys(old, new, config))
    }

    /// Sequence comparison using the stored tolerance.
    pub fn compare_sequences(&self, old: &[Value], new: &[Value]) -> DiffResult<SequenceDiff> {
        self.config.validate()?;
        diff_sequences(old, new, self.config.numeric_tolerance)
    }
}

/// Both roots as mappings, or the side that is not one.
fn mapping_roots<'a>(old: &'a Value, new: &'a Value) -> DiffResult<(&'a Mapping, &'a Mapping)> {
    let old_map = old.as_mapping().ok_or(DiffError::InvalidInput {
        side: Side::Old,
        actual: old.kind(),
    })?;
    let new_map = new.as_mapping().ok_or(DiffError::InvalidInput {
        side: Side::New,
        actual: new.kind(),
    })?;
    Ok((old_map, new_map))
}
