//! Error types for the Stackline core.
//!
//! Calendar construction and month-range labeling both fail through
//! [`CoreError`]; nothing in this crate panics on malformed input.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for calendar and labeling operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The value does not name a real calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// The range start is not strictly earlier than its end.
    #[error("Invalid date range: {from} is not before {to}")]
    InvalidDateRange {
        /// Start of the rejected range.
        from: String,
        /// End of the rejected range.
        to: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_range(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidDateRange {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Returns true if this error rejects a range rather than a single date.
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::InvalidDateRange { .. })
    }
}
