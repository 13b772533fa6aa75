use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};
use crate::path::IgnoreSet;

/// Configuration for a comparison.
///
/// A [`Comparer`](crate::Comparer) stores one of these as its default. A
/// config passed to a `*_with` call replaces the stored one for that call;
/// the two are never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparerConfig {
    /// Report a `type` change whenever the two values differ in kind, even
    /// if they are numerically equal.
    pub strict_types: bool,
    /// Exact key paths excluded from every report bucket.
    pub ignore_keys: IgnoreSet,
    /// Largest absolute difference at which two numbers still count as equal.
    pub numeric_tolerance: f64,
    /// Key mode only: keep evaluating the children of an ignored mapping.
    /// The ignored path itself is still never reported.
    pub descend_ignored: bool,
}

impl Default for ComparerConfig {
    fn default() -> Self {
        Self {
            strict_types: true,
            ignore_keys: IgnoreSet::new(),
            numeric_tolerance: 0.0,
            descend_ignored: false,
        }
    }
}

impl ComparerConfig {
    /// A configuration that compares numbers across kinds: `1` and `1.0`
    /// are equal under zero tolerance.
    pub fn lenient() -> Self {
        Self {
            strict_types: false,
            ..Default::default()
        }
    }

    pub fn with_strict_types(mut self, strict_types: bool) -> Self {
        self.strict_types = strict_types;
        self
    }

    pub fn with_ignore_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_keys = keys.into_iter().collect();
        self
    }

    pub fn with_numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = tolerance;
        self
    }

    pub fn with_descend_ignored(mut self, descend_ignored: bool) -> Self {
        self.descend_ignored = descend_ignored;
        self
    }

    /// Check that the tolerance is a finite, non-negative number.
    pub fn validate(&self) -> DiffResult<()> {
        if !self.numeric_tolerance.is_finite() || self.numeric_tolerance < 0.0 {
            return Err(DiffError::InvalidConfig(format!(
                "numeric_tolerance must be finite and non-negative, got {}",
                self.numeric_tolerance
            )));
        }
        Ok(())
    }

    /// Load a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(input: &str) -> DiffResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| DiffError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> DiffResult<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| DiffError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
