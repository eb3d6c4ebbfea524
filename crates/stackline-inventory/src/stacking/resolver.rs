//! Stack key resolution.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bucketing::BucketGroup;
use crate::types::{Aggregate, KeySampling};

/// A category key selecting one layer of a stacked chart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackKey(String);

impl StackKey {
    /// Creates a stack key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        StackKey(key.into())
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for StackKey {
    fn from(key: &str) -> Self {
        StackKey(key.to_string())
    }
}

impl PartialEq<&str> for StackKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Returns an aggregate's keys in first-seen order.
#[must_use]
pub fn resolve(aggregate: &Aggregate) -> Vec<StackKey> {
    aggregate.keys().map(StackKey::from).collect()
}

/// Returns the stack keys for a bucket-group query.
///
/// With [`KeySampling::FirstBucket`] only the first bucket's aggregate is
/// read, so a category present only in later buckets gets no layer. Callers
/// that can see several buckets with differing categories should opt into
/// [`KeySampling::Union`]. An empty group yields no keys.
#[must_use]
pub fn resolve_group<K>(
    group: &[BucketGroup<'_, K, Aggregate>],
    sampling: KeySampling,
) -> Vec<StackKey> {
    match sampling {
        KeySampling::FirstBucket => group
            .first()
            .map(|g| resolve(g.value))
            .unwrap_or_default(),
        KeySampling::Union => {
            let keys: IndexSet<&str> = group.iter().flat_map(|g| g.value.keys()).collect();
            keys.into_iter().map(StackKey::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackline_core::Label;

    #[test]
    fn test_resolve_first_seen_order() {
        let mut agg: Aggregate = [("Shirt", 75), ("T-Shirt", 75)].into_iter().collect();
        assert_eq!(resolve(&agg), ["Shirt", "T-Shirt"]);

        agg.increment("T-Shirt", 500).unwrap();
        agg.decrement("Shirt", 75).unwrap();
        assert_eq!(resolve(&agg), ["Shirt", "T-Shirt"]);
    }

    #[test]
    fn test_empty_group_resolves_to_nothing() {
        let group: Vec<BucketGroup<'_, Label, Aggregate>> = Vec::new();
        assert!(resolve_group(&group, KeySampling::FirstBucket).is_empty());
        assert!(resolve_group(&group, KeySampling::Union).is_empty());
    }

    #[test]
    fn test_first_bucket_sampling_misses_later_categories() {
        let (first, second) = (Label::from("Feb"), Label::from("Jan"));
        let a: Aggregate = [("Shirt", 10)].into_iter().collect();
        let b: Aggregate = [("Jeans", 4), ("Shirt", 2)].into_iter().collect();
        let group = vec![
            BucketGroup { key: &first, value: &a },
            BucketGroup { key: &second, value: &b },
        ];

        assert_eq!(resolve_group(&group, KeySampling::FirstBucket), ["Shirt"]);
        assert_eq!(resolve_group(&group, KeySampling::Union), ["Shirt", "Jeans"]);
    }
}
