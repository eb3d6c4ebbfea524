//! Incrementally maintained bucket index.

use indexmap::map::Values;
use stackline_core::Label;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::group::{Bucket, BucketGroup, RecordId};
use crate::error::{InventoryError, InventoryResult};
use crate::reducer::Reducer;
use crate::types::Record;

type KeyFn<K> = Box<dyn Fn(&Record) -> Option<K>>;

/// Members of one bucket in arrival order.
pub type Members<'a> = Values<'a, RecordId, Record>;

/// Records partitioned by one derived key, with one reduced value per bucket.
///
/// The index owns its records and hands out a [`RecordId`] for each one it
/// accepts. Each `add` folds the incoming record into its bucket's value with
/// [`Reducer::add`]; each removal applies [`Reducer::remove`]. Buckets
/// iterate in ascending key order.
///
/// Mutations are all-or-nothing: if the reducer rejects any record of a
/// batch, no bucket, member or value changes.
///
/// A bucket whose last member is removed stays in the index with its value,
/// so categories once seen keep their place in the aggregate.
pub struct BucketIndex<K, R: Reducer> {
    key_fn: KeyFn<K>,
    reducer: R,
    buckets: BTreeMap<K, Bucket<R::Value>>,
    locations: HashMap<RecordId, K>,
    next_id: u64,
}

impl<R: Reducer> BucketIndex<Label, R> {
    /// Creates an index keyed by each record's bucket label.
    ///
    /// Records must be tagged before they are added.
    #[must_use]
    pub fn by_label(reducer: R) -> Self {
        Self::new(|record: &Record| record.label().cloned(), reducer)
    }
}

impl<K: Ord + Clone, R: Reducer> BucketIndex<K, R> {
    /// Creates an empty index with a key-extraction function and reducer.
    ///
    /// A record for which `key_fn` returns `None` cannot be added.
    pub fn new<F>(key_fn: F, reducer: R) -> Self
    where
        F: Fn(&Record) -> Option<K> + 'static,
    {
        Self {
            key_fn: Box::new(key_fn),
            reducer,
            buckets: BTreeMap::new(),
            locations: HashMap::new(),
            next_id: 0,
        }
    }

    /// Returns the resident reducer.
    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Adds a batch of records, returning their ids in batch order.
    ///
    /// # Errors
    ///
    /// - `InventoryError::MissingBucketKey` if any record yields no key
    /// - any error raised by [`Reducer::add`], such as
    ///   `InventoryError::Overflow`
    ///
    /// Every value is computed before the index is touched, so nothing is
    /// added in either case.
    pub fn add<I>(&mut self, records: I) -> InventoryResult<Vec<RecordId>>
    where
        I: IntoIterator<Item = Record>,
        R::Value: Clone,
    {
        let keyed = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match (self.key_fn)(&record) {
                Some(key) => Ok((key, record)),
                None => Err(InventoryError::MissingBucketKey { index }),
            })
            .collect::<InventoryResult<Vec<_>>>()?;

        let mut staged: BTreeMap<K, R::Value> = BTreeMap::new();
        for (key, record) in &keyed {
            if !staged.contains_key(key) {
                let value = self
                    .buckets
                    .get(key)
                    .map_or_else(|| self.reducer.initial(), |b| b.value.clone());
                staged.insert(key.clone(), value);
            }
            if let Some(value) = staged.get_mut(key) {
                self.reducer.add(value, record)?;
            }
        }

        let mut ids = Vec::with_capacity(keyed.len());
        for (key, record) in keyed {
            let id = RecordId(self.next_id);
            self.next_id += 1;
            let reducer = &self.reducer;
            self.buckets
                .entry(key.clone())
                .or_insert_with(|| Bucket::new(reducer.initial()))
                .members
                .insert(id, record);
            self.locations.insert(id, key);
            ids.push(id);
        }
        for (key, value) in staged {
            if let Some(bucket) = self.buckets.get_mut(&key) {
                bucket.value = value;
            }
        }

        tracing::debug!(added = ids.len(), buckets = self.buckets.len(), "records added to index");
        Ok(ids)
    }

    /// Removes the record with the given id, returning it.
    ///
    /// Returns `Ok(None)`, leaving every value untouched, if the id is not
    /// held by this index.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`Reducer::remove`]; the record stays a
    /// member in that case.
    pub fn remove_id(&mut self, id: RecordId) -> InventoryResult<Option<Record>> {
        let Some(key) = self.locations.get(&id) else {
            return Ok(None);
        };
        let Some(bucket) = self.buckets.get_mut(key) else {
            return Ok(None);
        };
        let Some(record) = bucket.members.get(&id) else {
            return Ok(None);
        };
        self.reducer.remove(&mut bucket.value, record)?;

        let removed = bucket.members.shift_remove(&id);
        self.locations.remove(&id);
        Ok(removed)
    }

    /// Removes the first member equal to `record`, returning it.
    ///
    /// This compares records within the record's bucket; prefer
    /// [`remove_id`](Self::remove_id) when the id is at hand.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`Reducer::remove`].
    pub fn remove(&mut self, record: &Record) -> InventoryResult<Option<Record>> {
        let id = (self.key_fn)(record)
            .and_then(|key| self.buckets.get(&key))
            .and_then(|bucket| {
                bucket
                    .members
                    .iter()
                    .find_map(|(id, member)| (member == record).then_some(*id))
            });
        match id {
            Some(id) => self.remove_id(id),
            None => Ok(None),
        }
    }

    /// Removes every member matching `predicate`, returning them in bucket order.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`Reducer::remove`]. Nothing is removed in
    /// that case.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> InventoryResult<Vec<Record>>
    where
        P: FnMut(&Record) -> bool,
        R::Value: Clone,
    {
        let mut staged = Vec::new();
        for (key, bucket) in &self.buckets {
            let gone: HashSet<RecordId> = bucket
                .members
                .iter()
                .filter_map(|(id, record)| predicate(record).then_some(*id))
                .collect();
            if gone.is_empty() {
                continue;
            }
            let mut value = bucket.value.clone();
            for (_, record) in bucket.members.iter().filter(|(id, _)| gone.contains(*id)) {
                self.reducer.remove(&mut value, record)?;
            }
            staged.push((key.clone(), gone, value));
        }

        let mut removed = Vec::new();
        for (key, gone, value) in staged {
            let Some(bucket) = self.buckets.get_mut(&key) else {
                continue;
            };
            bucket.value = value;
            let (out, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut bucket.members)
                .into_iter()
                .partition(|(id, _)| gone.contains(id));
            bucket.members = kept.into_iter().collect();
            for (id, record) in out {
                self.locations.remove(&id);
                removed.push(record);
            }
        }

        tracing::debug!(removed = removed.len(), "records removed from index");
        Ok(removed)
    }

    /// Returns every bucket's `{ key, value }` pair in key order.
    #[must_use]
    pub fn group(&self) -> Vec<BucketGroup<'_, K, R::Value>> {
        self.buckets
            .iter()
            .map(|(key, bucket)| BucketGroup {
                key,
                value: &bucket.value,
            })
            .collect()
    }

    /// Applies another reducer to every bucket by a full fold.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while folding a bucket.
    pub fn regroup<R2: Reducer>(&self, reducer: &R2) -> InventoryResult<Vec<(K, R2::Value)>> {
        self.buckets
            .iter()
            .map(|(key, bucket)| {
                reducer
                    .fold(bucket.members.values())
                    .map(|value| (key.clone(), value))
            })
            .collect()
    }

    /// Returns the bucket keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.keys()
    }

    /// Returns every bucket's key and members in key order.
    pub fn buckets(&self) -> impl Iterator<Item = (&K, Members<'_>)> + '_ {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key, bucket.members.values()))
    }

    /// Returns the members of one bucket.
    #[must_use]
    pub fn members(&self, key: &K) -> Option<Members<'_>> {
        self.buckets.get(key).map(|b| b.members.values())
    }

    /// Returns the members of one bucket with their ids.
    pub fn entries(&self, key: &K) -> Option<impl Iterator<Item = (RecordId, &Record)> + '_> {
        self.buckets
            .get(key)
            .map(|b| b.members.iter().map(|(id, record)| (*id, record)))
    }

    /// Returns the record with the given id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        let key = self.locations.get(&id)?;
        self.buckets.get(key)?.members.get(&id)
    }

    /// Returns the reduced value of one bucket.
    #[must_use]
    pub fn aggregate(&self, key: &K) -> Option<&R::Value> {
        self.buckets.get(key).map(|b| &b.value)
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of records across all buckets.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if the index holds no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drops every bucket and record. Ids issued before are not reused.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.locations.clear();
    }
}

impl<K: fmt::Debug, R: Reducer + fmt::Debug> fmt::Debug for BucketIndex<K, R>
where
    R::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketIndex")
            .field("reducer", &self.reducer)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}
