//! Whole-engine lock for shared use.
//!
//! The replacement engine is single-threaded: every operation mutates the
//! index and the order structure with no internal synchronization, so
//! uncoordinated concurrent mutation would corrupt links. [`SyncCache`]
//! is the serialization discipline the engine asks its callers for: one
//! exclusive [`parking_lot::Mutex`] around the whole engine. Even reads
//! take the lock, because a `get` repositions the entry it hits.
//!
//! Values are returned by clone so no lock guard escapes an operation.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::{Cache, CacheStats, Policy};
use crate::error::ConfigError;

/// Thread-safe wrapper serializing all access to a [`Cache`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use cachex::{Policy, SyncCache};
///
/// let cache = Arc::new(SyncCache::new(100, Policy::Lru).unwrap());
/// let worker = {
///     let cache = Arc::clone(&cache);
///     std::thread::spawn(move || cache.put(1, "one"))
/// };
/// worker.join().unwrap();
/// assert_eq!(cache.get(&1), Some("one"));
/// ```
#[derive(Debug)]
pub struct SyncCache<K, V> {
    inner: Mutex<Cache<K, V>>,
}

impl<K, V> SyncCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a locked cache. See [`Cache::new`] for the parameter
    /// contract.
    pub fn new(capacity: usize, policy: Policy) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(Cache::new(capacity, policy)?),
        })
    }

    /// Looks up `key`, repositioning on a hit. Returns a clone.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts or updates `key`; returns the displaced value on update.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Looks up `key` without repositioning or counting.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Removes `key` and returns its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Returns `true` if `key` is cached.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// The eviction policy chosen at construction.
    pub fn policy(&self) -> Policy {
        self.inner.lock().policy()
    }

    /// Lifetime count of `get` hits.
    pub fn hit_count(&self) -> u64 {
        self.inner.lock().hit_count()
    }

    /// Lifetime count of `get` misses.
    pub fn miss_count(&self) -> u64 {
        self.inner.lock().miss_count()
    }

    /// Snapshot of counters and occupancy.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Drops all entries, keeping lifetime counters.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}
