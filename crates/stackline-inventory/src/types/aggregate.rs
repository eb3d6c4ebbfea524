//! Ordered category aggregate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

/// Running unit sums per category for one bucket.
///
/// Keys iterate in first-seen order: a category is appended the first time it
/// is touched and keeps its position for the lifetime of the aggregate, even
/// when its sum returns to zero. Equality compares keys, values and order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    sums: IndexMap<String, i64>,
}

impl Aggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the running sum for a category, 0 if it was never seen.
    #[must_use]
    pub fn get(&self, category: &str) -> i64 {
        self.sums.get(category).copied().unwrap_or(0)
    }

    /// Returns true if the category has been seen.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.sums.contains_key(category)
    }

    /// Adds `units` to a category, appending the key if it is new.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Overflow` if the sum would leave the range of
    /// `i64`. The aggregate is unchanged in that case.
    pub fn increment(&mut self, category: &str, units: i64) -> InventoryResult<()> {
        self.apply(category, units, i64::checked_add)
    }

    /// Subtracts `units` from a category, appending the key if it is new.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Overflow` if the difference would leave the
    /// range of `i64`. The aggregate is unchanged in that case.
    pub fn decrement(&mut self, category: &str, units: i64) -> InventoryResult<()> {
        self.apply(category, units, i64::checked_sub)
    }

    fn apply(
        &mut self,
        category: &str,
        units: i64,
        op: fn(i64, i64) -> Option<i64>,
    ) -> InventoryResult<()> {
        let current = self.get(category);
        let next = op(current, units).ok_or_else(|| InventoryError::overflow(category, units))?;
        match self.sums.get_mut(category) {
            Some(sum) => *sum = next,
            None => {
                self.sums.insert(category.to_string(), next);
            }
        }
        Ok(())
    }

    /// Returns the categories in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.sums.keys().map(String::as_str)
    }

    /// Returns `(category, sum)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.sums.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns the number of categories seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    /// Returns true if no category has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Returns the sum across all categories, `None` if it overflows `i64`.
    #[must_use]
    pub fn total(&self) -> Option<i64> {
        self.sums.values().try_fold(0_i64, |acc, v| acc.checked_add(*v))
    }
}

impl PartialEq for Aggregate {
    fn eq(&self, other: &Self) -> bool {
        self.sums.len() == other.sums.len() && self.sums.iter().eq(other.sums.iter())
    }
}

impl Eq for Aggregate {}

/// Collects `(category, sum)` pairs as given. A repeated category keeps its
/// first position and takes the last sum.
impl<S: Into<String>> FromIterator<(S, i64)> for Aggregate {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            sums: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
