//! Incremental reducers.
//!
//! A [`Reducer`] maintains one value per bucket through three operations:
//! `initial`, `add` and `remove`. Implementations must satisfy the inverse
//! law: for any value `v` and record `r`, applying `add(v, r)` and then
//! `remove(v, r)` leaves `v` observationally unchanged (same keys, same
//! values, same order). Bucket owners rely on it to move records between
//! buckets one at a time instead of recomputing from scratch.
//!
//! `add` and `remove` are fallible so that arithmetic overflow surfaces as
//! [`InventoryError::Overflow`]. A call that fails leaves `acc` unchanged.

use crate::error::{InventoryError, InventoryResult};
use crate::types::{Aggregate, Record};

/// Sentinel category for records without a usable category.
pub const DEFAULT_MISSING_CATEGORY_KEY: &str = "undefined";

/// An add/remove/initial triple that maintains a per-bucket value.
pub trait Reducer {
    /// The value maintained per bucket.
    type Value;

    /// Returns the value of an empty bucket.
    fn initial(&self) -> Self::Value;

    /// Folds a record entering the bucket into `acc`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving `acc` unchanged, if the value cannot absorb
    /// the record.
    fn add(&self, acc: &mut Self::Value, record: &Record) -> InventoryResult<()>;

    /// Reverses a previous `add` of the same record.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving `acc` unchanged, if the value cannot release
    /// the record.
    fn remove(&self, acc: &mut Self::Value, record: &Record) -> InventoryResult<()>;

    /// Folds a whole bucket from scratch.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`add`](Self::add).
    fn fold<'a, I>(&self, records: I) -> InventoryResult<Self::Value>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut acc = self.initial();
        for record in records {
            self.add(&mut acc, record)?;
        }
        Ok(acc)
    }
}

impl<R: Reducer> Reducer for &R {
    type Value = R::Value;

    fn initial(&self) -> Self::Value {
        (**self).initial()
    }

    fn add(&self, acc: &mut Self::Value, record: &Record) -> InventoryResult<()> {
        (**self).add(acc, record)
    }

    fn remove(&self, acc: &mut Self::Value, record: &Record) -> InventoryResult<()> {
        (**self).remove(acc, record)
    }
}

/// Running unit sums per category.
///
/// Records without a usable category are summed under `missing_key`
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySumReducer {
    missing_key: String,
}

impl Default for CategorySumReducer {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_CATEGORY_KEY)
    }
}

impl CategorySumReducer {
    /// Creates a reducer with the given sentinel key.
    #[must_use]
    pub fn new(missing_key: impl Into<String>) -> Self {
        Self {
            missing_key: missing_key.into(),
        }
    }

    /// Returns the sentinel key.
    #[must_use]
    pub fn missing_key(&self) -> &str {
        &self.missing_key
    }

    /// Returns the key a record aggregates under.
    #[must_use]
    pub fn key_for<'a>(&'a self, record: &'a Record) -> &'a str {
        match record.category() {
            Some(category) => category,
            None => {
                tracing::debug!(
                    sentinel = %self.missing_key,
                    units = record.total_units,
                    "record without category aggregated under sentinel"
                );
                &self.missing_key
            }
        }
    }
}

impl Reducer for CategorySumReducer {
    type Value = Aggregate;

    fn initial(&self) -> Aggregate {
        Aggregate::new()
    }

    fn add(&self, acc: &mut Aggregate, record: &Record) -> InventoryResult<()> {
        acc.increment(self.key_for(record), record.total_units)
    }

    fn remove(&self, acc: &mut Aggregate, record: &Record) -> InventoryResult<()> {
        acc.decrement(self.key_for(record), record.total_units)
    }
}

/// Number of records per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountReducer;

impl Reducer for CountReducer {
    type Value = usize;

    fn initial(&self) -> usize {
        0
    }

    fn add(&self, acc: &mut usize, _record: &Record) -> InventoryResult<()> {
        *acc += 1;
        Ok(())
    }

    fn remove(&self, acc: &mut usize, _record: &Record) -> InventoryResult<()> {
        *acc = acc.saturating_sub(1);
        Ok(())
    }
}

const SUM_KEY: &str = "sum";

/// Running sum of one numeric value per record.
///
/// ```rust
/// use stackline_inventory::reducer::{Reducer, SumReducer};
/// use stackline_inventory::types::Record;
///
/// let units = SumReducer::new(|r: &Record| r.total_units);
/// let records = [Record::new("Shirt", 25), Record::new("T-Shirt", 10)];
/// assert_eq!(units.fold(&records)?, 35);
/// # Ok::<(), stackline_inventory::InventoryError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SumReducer<F> {
    value: F,
}

impl<F> SumReducer<F>
where
    F: Fn(&Record) -> i64,
{
    /// Creates a reducer summing `value(record)`.
    pub fn new(value: F) -> Self {
        Self { value }
    }
}

impl<F> Reducer for SumReducer<F>
where
    F: Fn(&Record) -> i64,
{
    type Value = i64;

    fn initial(&self) -> i64 {
        0
    }

    fn add(&self, acc: &mut i64, record: &Record) -> InventoryResult<()> {
        let units = (self.value)(record);
        *acc = acc
            .checked_add(units)
            .ok_or_else(|| InventoryError::overflow(SUM_KEY, units))?;
        Ok(())
    }

    fn remove(&self, acc: &mut i64, record: &Record) -> InventoryResult<()> {
        let units = (self.value)(record);
        *acc = acc
            .checked_sub(units)
            .ok_or_else(|| InventoryError::overflow(SUM_KEY, units))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_empty() {
        assert!(CategorySumReducer::default().initial().is_empty());
    }

    #[test]
    fn test_add_creates_key() {
        let reducer = CategorySumReducer::default();
        let mut acc = reducer.initial();
        reducer.add(&mut acc, &Record::new("Shirt", 25)).unwrap();
        assert_eq!(acc.get("Shirt"), 25);
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_remove_reverses_add() {
        let reducer = CategorySumReducer::default();
        let mut acc: Aggregate = [("Shirt", 50), ("T-Shirt", 75)].into_iter().collect();
        let before = acc.clone();
        let record = Record::new("T-Shirt", 25);

        reducer.add(&mut acc, &record).unwrap();
        assert_eq!(acc.get("T-Shirt"), 100);
        reducer.remove(&mut acc, &record).unwrap();
        assert_eq!(acc, before);
    }

    #[test]
    fn test_extreme_units_round_trip() {
        let reducer = CategorySumReducer::default();
        let mut acc: Aggregate = [("Shirt", 1)].into_iter().collect();
        let record = Record::new("Shirt", i64::MIN);

        reducer.add(&mut acc, &record).unwrap();
        assert_eq!(acc.get("Shirt"), i64::MIN + 1);
        reducer.remove(&mut acc, &record).unwrap();
        assert_eq!(acc.get("Shirt"), 1);
    }

    #[test]
    fn test_overflowing_add_is_rejected() {
        let reducer = CategorySumReducer::default();
        let mut acc = reducer.initial();
        reducer.add(&mut acc, &Record::new("Shirt", i64::MAX)).unwrap();
        let before = acc.clone();

        let err = reducer.add(&mut acc, &Record::new("Shirt", 1)).unwrap_err();
        assert!(matches!(err, InventoryError::Overflow { ref key, .. } if key == "Shirt"));
        assert_eq!(acc, before);
    }

    #[test]
    fn test_missing_category_uses_sentinel() {
        let reducer = CategorySumReducer::default();
        let acc = reducer
            .fold(&[
                Record::new("Shirt", 25),
                Record::uncategorized(5),
                Record::new("", 3),
            ])
            .unwrap();
        assert_eq!(acc.keys().collect::<Vec<_>>(), ["Shirt", "undefined"]);
        assert_eq!(acc.get("undefined"), 8);
    }

    #[test]
    fn test_custom_sentinel() {
        let reducer = CategorySumReducer::new("unknown");
        let acc = reducer.fold(&[Record::uncategorized(5)]).unwrap();
        assert_eq!(acc.get("unknown"), 5);
        assert_eq!(reducer.missing_key(), "unknown");
    }

    #[test]
    fn test_count_reducer() {
        let records = [Record::new("Shirt", 25), Record::new("Shirt", 25)];
        let mut count = CountReducer.fold(&records).unwrap();
        assert_eq!(count, 2);
        CountReducer.remove(&mut count, &records[0]).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_sum_reducer_over_attribute() {
        let cost = SumReducer::new(|r: &Record| {
            r.attribute("cost").and_then(serde_json::Value::as_i64).unwrap_or(0)
        });
        let records = [
            Record::new("Apple", 20).with_attribute("cost", 200),
            Record::new("Orange", 10).with_attribute("cost", 80),
            Record::new("Grapes", 50),
        ];
        assert_eq!(cost.fold(&records).unwrap(), 280);
    }

    #[test]
    fn test_sum_reducer_overflow() {
        let units = SumReducer::new(|r: &Record| r.total_units);
        let records = [Record::new("Shirt", i64::MAX), Record::new("Shirt", 1)];
        assert!(matches!(
            units.fold(&records),
            Err(InventoryError::Overflow { units: 1, .. })
        ));

        let mut acc = 0;
        units.add(&mut acc, &Record::new("Shirt", i64::MIN)).unwrap();
        units.remove(&mut acc, &Record::new("Shirt", i64::MIN)).unwrap();
        assert_eq!(acc, 0);
    }

    #[test]
    fn test_reducer_by_reference() {
        let reducer = CategorySumReducer::default();
        let by_ref = &reducer;
        assert_eq!(by_ref.fold(&[Record::new("Shirt", 1)]).unwrap().get("Shirt"), 1);
    }
}
