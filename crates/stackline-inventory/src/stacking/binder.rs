//! Per-layer accessors.

use serde::{Deserialize, Serialize};

use super::resolver::StackKey;
use crate::bucketing::BucketGroup;
use crate::types::Aggregate;

/// Returns an accessor reading `key` from any aggregate, 0 when absent.
pub fn select(key: &StackKey) -> impl Fn(&Aggregate) -> i64 + Clone {
    let key = key.clone();
    move |aggregate: &Aggregate| aggregate.get(key.as_str())
}

/// One stacked layer bound to its category key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackLayer {
    key: StackKey,
}

impl StackLayer {
    /// Binds a layer to a key.
    #[must_use]
    pub fn new(key: StackKey) -> Self {
        Self { key }
    }

    /// Returns the layer's key.
    #[must_use]
    pub fn key(&self) -> &StackKey {
        &self.key
    }

    /// Returns this layer's height in one aggregate.
    #[must_use]
    pub fn value(&self, aggregate: &Aggregate) -> i64 {
        aggregate.get(self.key.as_str())
    }

    /// Returns a standalone accessor for this layer.
    pub fn accessor(&self) -> impl Fn(&Aggregate) -> i64 + Clone {
        select(&self.key)
    }

    /// Returns this layer's height in every bucket, in group order.
    #[must_use]
    pub fn heights<K: Clone>(&self, group: &[BucketGroup<'_, K, Aggregate>]) -> Vec<(K, i64)> {
        group
            .iter()
            .map(|g| (g.key.clone(), self.value(g.value)))
            .collect()
    }
}

/// Binds one layer per key, preserving key order.
#[must_use]
pub fn bind(keys: &[StackKey]) -> Vec<StackLayer> {
    keys.iter().cloned().map(StackLayer::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackline_core::Label;

    #[test]
    fn test_select_reads_key() {
        let agg: Aggregate = [("Shirt", 75), ("T-Shirt", 75)].into_iter().collect();
        let shirt = select(&StackKey::from("Shirt"));
        let jeans = select(&StackKey::from("Jeans"));
        assert_eq!(shirt(&agg), 75);
        assert_eq!(jeans(&agg), 0);
    }

    #[test]
    fn test_bind_preserves_order() {
        let keys = [StackKey::from("Shirt"), StackKey::from("T-Shirt")];
        let layers = bind(&keys);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].key(), &keys[0]);
        assert_eq!(layers[1].key(), &keys[1]);
    }

    #[test]
    fn test_layer_heights_per_bucket() {
        let (jan, feb) = (Label::from("Jan"), Label::from("Feb"));
        let a: Aggregate = [("Shirt", 50), ("T-Shirt", 75)].into_iter().collect();
        let b: Aggregate = [("T-Shirt", 5)].into_iter().collect();
        let group = vec![
            BucketGroup { key: &feb, value: &b },
            BucketGroup { key: &jan, value: &a },
        ];

        let layer = StackLayer::new(StackKey::from("Shirt"));
        assert_eq!(layer.heights(&group), vec![(feb.clone(), 0), (jan.clone(), 50)]);
        assert_eq!(layer.accessor()(&a), 50);
    }
}
