//! Sharded ordered map for concurrent accumulation.
//!
//! Keys are spread over a fixed number of shards by `key % shard_count`; each
//! shard is a `BTreeMap` behind its own mutex. Workers updating different
//! shards never contend, and a single update holds its shard lock only for one
//! lookup or insert.
//!
//! # Examples
//!
//! ```
//! use lectern::parallel_search::ConcurrentMap;
//! use rayon::prelude::*;
//!
//! let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4).unwrap();
//! (0..100).into_par_iter().for_each(|i| {
//!     *map.access(i % 10) += 1.0;
//! });
//!
//! let merged = map.into_ordered_map();
//! assert_eq!(merged.len(), 10);
//! assert_eq!(merged[&3], 10.0);
//! ```

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::error::{LecternError, Result};

/// Integer keys that can be routed to a shard.
pub trait ShardKey: Copy + Ord {
    /// Value reduced modulo the shard count to pick a shard.
    fn shard_hash(&self) -> u64;
}

impl ShardKey for i32 {
    fn shard_hash(&self) -> u64 {
        *self as u64
    }
}

impl ShardKey for i64 {
    fn shard_hash(&self) -> u64 {
        *self as u64
    }
}

impl ShardKey for u32 {
    fn shard_hash(&self) -> u64 {
        u64::from(*self)
    }
}

impl ShardKey for u64 {
    fn shard_hash(&self) -> u64 {
        *self
    }
}

impl ShardKey for usize {
    fn shard_hash(&self) -> u64 {
        *self as u64
    }
}

/// Exclusive access to one value of a [`ConcurrentMap`].
///
/// The owning shard stays locked until this guard is dropped.
pub struct Access<'a, V> {
    guard: MappedMutexGuard<'a, V>,
}

impl<V> Deref for Access<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.guard
    }
}

impl<V> DerefMut for Access<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.guard
    }
}

/// A map split into independently locked shards.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Create a map with `shard_count` shards.
    pub fn new(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(LecternError::invalid_argument(
                "concurrent map needs at least one shard",
            ));
        }
        let shards = (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        Ok(ConcurrentMap { shards })
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let index = key.shard_hash() % self.shards.len() as u64;
        &self.shards[index as usize]
    }

    /// Lock the key's shard and return its value, inserting the default
    /// value on first access.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        let guard = MutexGuard::map(self.shard(&key).lock(), |map| map.entry(key).or_default());
        Access { guard }
    }

    /// Remove a key, returning its value if it was present.
    pub fn delete(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Total number of keys. Shards are locked one at a time.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Whether no shard holds a key.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Copy every shard into one ordered map.
    ///
    /// Shards are locked one at a time, so a snapshot taken while writers are
    /// active is consistent per shard only.
    pub fn snapshot_ordered(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            merged.extend(shard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Merge every shard into one ordered map, consuming the map.
    pub fn into_ordered_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}
