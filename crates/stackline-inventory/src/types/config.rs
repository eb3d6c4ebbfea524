//! Configuration for stacked aggregation.

use serde::{Deserialize, Serialize};
use stackline_core::labeling::{MonthRangeLabeler, DEFAULT_RANGE_SEPARATOR};
use std::path::Path;

use crate::error::{InventoryError, InventoryResult};
use crate::reducer::DEFAULT_MISSING_CATEGORY_KEY;

/// How stack keys are discovered from a set of buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySampling {
    /// Keys of the first bucket only.
    ///
    /// Categories that appear only in later buckets get no layer.
    #[default]
    FirstBucket,
    /// First-seen union of keys across all buckets, in bucket order.
    Union,
}

/// Configuration for building a stacked view.
///
/// Every field has a default, so a partial TOML file is valid:
///
/// ```toml
/// missing_category_key = "unknown"
/// key_sampling = "union"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Category key that records without a usable category aggregate under.
    pub missing_category_key: String,

    /// Separator between the first and last month of a range label.
    pub range_separator: String,

    /// Stack key discovery strategy.
    pub key_sampling: KeySampling,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            missing_category_key: DEFAULT_MISSING_CATEGORY_KEY.to_string(),
            range_separator: DEFAULT_RANGE_SEPARATOR.to_string(),
            key_sampling: KeySampling::FirstBucket,
        }
    }
}

impl StackConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sentinel key for uncategorized records.
    #[must_use]
    pub fn with_missing_category_key(mut self, key: impl Into<String>) -> Self {
        self.missing_category_key = key.into();
        self
    }

    /// Sets the range label separator.
    #[must_use]
    pub fn with_range_separator(mut self, separator: impl Into<String>) -> Self {
        self.range_separator = separator.into();
        self
    }

    /// Sets the stack key discovery strategy.
    #[must_use]
    pub fn with_key_sampling(mut self, sampling: KeySampling) -> Self {
        self.key_sampling = sampling;
        self
    }

    /// Returns the labeler this config describes.
    #[must_use]
    pub fn labeler(&self) -> MonthRangeLabeler {
        MonthRangeLabeler::new().with_separator(self.range_separator.clone())
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> InventoryResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| InventoryError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> InventoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| InventoryError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> InventoryResult<()> {
        if self.missing_category_key.trim().is_empty() {
            return Err(InventoryError::config("missing_category_key must not be blank"));
        }
        Ok(())
    }
}
