//! Error types for inventory aggregation.
//!
//! Only rejected input surfaces here. A record without a usable category is
//! aggregated under a sentinel key and an empty bucket set resolves to no
//! stack keys; neither is an error.

use stackline_core::CoreError;
use thiserror::Error;

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur while labeling, tagging, or bucketing records.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The request window could not be labeled.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record already carries a different label.
    #[error("Record {index} is already labeled '{existing}', refusing '{requested}'")]
    LabelConflict {
        /// Position of the record in the tagged batch.
        index: usize,
        /// The label the record already carries.
        existing: String,
        /// The label that was requested.
        requested: String,
    },

    /// A record yielded no bucket key.
    #[error("Record {index} has no bucket key")]
    MissingBucketKey {
        /// Position of the record in the added batch.
        index: usize,
    },

    /// A running sum would leave the range of `i64`.
    #[error("Running sum for '{key}' overflows applying {units} units")]
    Overflow {
        /// The aggregate key whose sum overflowed.
        key: String,
        /// The signed units that were being applied.
        units: i64,
    },

    /// The upstream report marked itself as failed.
    #[error("Report for request '{report_type}' is flagged as an error")]
    ReportFlagged {
        /// The request type of the flagged report.
        report_type: String,
    },

    /// The report payload is not valid JSON for the expected schema.
    #[error("Invalid report payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration could not be read or parsed.
    #[error("Invalid configuration: {reason}")]
    Config {
        /// The reason the configuration was rejected.
        reason: String,
    },
}

impl InventoryError {
    /// Create a label conflict error.
    #[must_use]
    pub fn label_conflict(
        index: usize,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::LabelConflict {
            index,
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    /// Create an overflow error.
    #[must_use]
    pub fn overflow(key: impl Into<String>, units: i64) -> Self {
        Self::Overflow {
            key: key.into(),
            units,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if the error rejects the request window itself.
    #[must_use]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_range_error())
    }
}
