//! Bucket query results.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::Record;

/// One `{ key, value }` pair of a bucket-group query.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BucketGroup<'a, K, V> {
    /// The bucket key.
    pub key: &'a K,
    /// The reduced value of the bucket.
    pub value: &'a V,
}

impl<K, V> Clone for BucketGroup<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for BucketGroup<'_, K, V> {}

/// Handle to one record held by a [`BucketIndex`](super::BucketIndex).
///
/// Ids are issued in arrival order and never reused by the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RecordId(pub(crate) u64);

impl RecordId {
    /// Returns the raw id.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Members and reduced value of one bucket. Members keep arrival order.
#[derive(Debug, Clone)]
pub(crate) struct Bucket<V> {
    pub(crate) members: IndexMap<RecordId, Record>,
    pub(crate) value: V,
}

impl<V> Bucket<V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            members: IndexMap::new(),
            value,
        }
    }
}
