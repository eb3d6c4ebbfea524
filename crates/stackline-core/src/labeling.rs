//! Month-range labeling.
//!
//! Turns a `(from, to)` request window into the single display label that
//! every record of one pipeline run is bucketed under. The window covers
//! whole days: `to` is included up to the end of its own day.
//!
//! ```rust
//! use stackline_core::labeling::MonthRangeLabeler;
//!
//! let labeler = MonthRangeLabeler::default();
//! assert_eq!(labeler.label_compact(20190112, 20190115).unwrap().as_str(), "Jan");
//! assert_eq!(labeler.label_compact(20190101, 20190301).unwrap().as_str(), "Jan - Mar");
//! assert!(labeler.label_compact(20190115, 20190112).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Label};

/// Separator placed between the first and last month of a multi-month label.
pub const DEFAULT_RANGE_SEPARATOR: &str = " - ";

/// Returns the month abbreviations visited by a calendar cursor walking from
/// `from` to `to` in whole-month steps.
///
/// The cursor starts at `from` and advances with [`Date::add_months`] applied
/// to itself, so end-of-month clamping carries forward (Jan 31, Feb 28,
/// Mar 28, ...). A month is emitted while the cursor has not passed `to`.
///
/// The walk is bounded by the month span of the window, computed up front.
///
/// # Errors
///
/// Returns `CoreError::InvalidDateRange` unless `from` is strictly before `to`.
pub fn month_sequence(from: Date, to: Date) -> CoreResult<Vec<String>> {
    if from >= to {
        return Err(CoreError::invalid_range(from, to));
    }

    let span = usize::try_from(to.month_index() - from.month_index() + 1)
        .map_err(|_| CoreError::invalid_range(from, to))?;
    let mut months = Vec::with_capacity(span);
    let mut cursor = from;

    for _ in 0..span {
        if cursor > to {
            break;
        }
        months.push(cursor.month_abbrev());
        cursor = cursor.add_months(1)?;
    }

    log::debug!("month sequence {from}..={to}: {months:?}");
    Ok(months)
}

/// Builds display labels for request windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRangeLabeler {
    /// Text placed between the first and last month.
    pub separator: String,
}

impl Default for MonthRangeLabeler {
    fn default() -> Self {
        Self {
            separator: DEFAULT_RANGE_SEPARATOR.to_string(),
        }
    }
}

impl MonthRangeLabeler {
    /// Creates a labeler with the default `" - "` separator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the range separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Labels the window `[from, to]`.
    ///
    /// A single month yields that month (`"Jan"`); several months yield
    /// `"<first><separator><last>"` (`"Jan - Mar"`).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateRange` unless `from` is strictly before `to`.
    pub fn label(&self, from: Date, to: Date) -> CoreResult<Label> {
        let months = month_sequence(from, to)?;
        self.join(&months)
            .ok_or_else(|| CoreError::invalid_range(from, to))
    }

    /// Labels a window given as compact `YYYYMMDD` integers.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` for a malformed date and
    /// `CoreError::InvalidDateRange` for an empty or reversed window.
    pub fn label_compact(&self, from: u32, to: u32) -> CoreResult<Label> {
        self.label(Date::from_compact(from)?, Date::from_compact(to)?)
    }

    fn join(&self, months: &[String]) -> Option<Label> {
        match months {
            [] => None,
            [only] => Some(Label::new(only.clone())),
            [first, .., last] => Some(Label::new(format!("{first}{}{last}", self.separator))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(value: u32) -> Date {
        Date::from_compact(value).unwrap()
    }

    #[test]
    fn test_single_month() {
        let label = MonthRangeLabeler::new().label(d(20190112), d(20190115)).unwrap();
        assert_eq!(label.as_str(), "Jan");
    }

    #[test]
    fn test_month_range() {
        let label = MonthRangeLabeler::new().label(d(20190101), d(20190301)).unwrap();
        assert_eq!(label.as_str(), "Jan - Mar");
        assert_eq!(
            month_sequence(d(20190101), d(20190301)).unwrap(),
            ["Jan", "Feb", "Mar"]
        );
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = MonthRangeLabeler::new()
            .label_compact(20190115, 20190112)
            .unwrap_err();
        assert!(err.is_range_error());
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let err = month_sequence(d(20190112), d(20190112)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_invalid_compact_date() {
        let err = MonthRangeLabeler::new()
            .label_compact(20190230, 20190301)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { .. }));
    }

    #[test]
    fn test_year_boundary() {
        let label = MonthRangeLabeler::new().label(d(20181115), d(20190220)).unwrap();
        assert_eq!(label.as_str(), "Nov - Feb");
        assert_eq!(month_sequence(d(20181115), d(20190220)).unwrap().len(), 4);
    }

    #[test]
    fn test_clamped_cursor_carries_forward() {
        // Jan 31 -> Feb 28 -> Mar 28, which is still before Mar 29.
        let months = month_sequence(d(20190131), d(20190329)).unwrap();
        assert_eq!(months, ["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_cursor_past_end_stops() {
        let months = month_sequence(d(20190115), d(20190310)).unwrap();
        assert_eq!(months, ["Jan", "Feb"]);
    }

    #[test]
    fn test_custom_separator() {
        let label = MonthRangeLabeler::new()
            .with_separator(" to ")
            .label(d(20190101), d(20190401))
            .unwrap();
        assert_eq!(label.as_str(), "Jan to Apr");
    }

    proptest! {
        #[test]
        fn prop_sequence_is_bounded_by_span(
            start in 0i32..400,
            days in 1i64..2000,
        ) {
            let from = Date::from_ymd(2000, 1, 1).unwrap().as_naive_date()
                + chrono::Duration::days(i64::from(start));
            let to = from + chrono::Duration::days(days);
            let (from, to) = (Date::from(from), Date::from(to));
            let months = month_sequence(from, to).unwrap();
            let span = (to.month_index() - from.month_index() + 1) as usize;
            prop_assert!(!months.is_empty());
            prop_assert!(months.len() <= span);
            prop_assert_eq!(&months[0], &from.month_abbrev());
        }
    }
}
