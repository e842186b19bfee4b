//! The replacement engine: index + order structure + eviction driver.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                         Cache<K, V>                           │
//!   │                                                               │
//!   │   ┌─────────────────────────────┐                             │
//!   │   │  index: FxHashMap<K, SlotId>│   key → handle, O(1)        │
//!   │   └──────────────┬──────────────┘                             │
//!   │                  ▼                                            │
//!   │   ┌─────────────────────────────────────────────────────────┐ │
//!   │   │  order: one of                                          │ │
//!   │   │    Lru(Chain)  head = victim   tail = newest            │ │
//!   │   │    Mru(Chain)  head = oldest   tail = victim            │ │
//!   │   │    Lfu(FreqBuckets)  min-frequency bucket head = victim │ │
//!   │   └─────────────────────────────────────────────────────────┘ │
//!   │                                                               │
//!   │   hits / misses / evictions: monotone lifetime counters       │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each [`Entry`] exists exactly once, owned by a node of the active order
//! structure; the index stores only its [`SlotId`] handle. Every operation
//! keeps the two structures in lockstep: an entry is indexed iff it
//! occupies exactly one ordering position.
//!
//! ## Operation flow
//!
//! ```text
//!   get(k):  index hit?  ── no ──► count miss, return None
//!               │ yes
//!               ▼
//!            count hit, reposition (move_to_back / bucket promotion),
//!            return the value
//!
//!   put(k, v):  key present?  ── yes ──► replace value, reposition as a
//!               │ no                     hit, return the old value
//!               ▼
//!            at capacity?  ── yes ──► evict the policy victim from BOTH
//!               │ no                  structures first
//!               ▼
//!            append entry (chain tail / frequency-1 bucket tail),
//!            index the new handle
//! ```
//!
//! The policy is chosen once at construction and is immutable; dispatch is
//! an exhaustive match on the order-structure variant, so a missing
//! eviction rule is a compile error rather than a runtime fallback.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::ds::{Chain, FreqBuckets, SlotId};
use crate::entry::Entry;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Eviction policy tag. Fixed for the lifetime of a [`Cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Evict the least recently used entry.
    Lru,
    /// Evict the most recently used entry.
    Mru,
    /// Evict the least frequently used entry; FIFO among frequency ties.
    Lfu,
}

impl Policy {
    /// Canonical lowercase tag for this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Lru => "lru",
            Policy::Mru => "mru",
            Policy::Lfu => "lfu",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    /// Parses a policy tag, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use cachex::{ConfigError, Policy};
    ///
    /// assert_eq!("LRU".parse::<Policy>(), Ok(Policy::Lru));
    /// assert_eq!("lfu".parse::<Policy>(), Ok(Policy::Lfu));
    /// assert!(matches!(
    ///     "clock".parse::<Policy>(),
    ///     Err(ConfigError::UnsupportedPolicy(_))
    /// ));
    /// ```
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag.eq_ignore_ascii_case("lru") {
            Ok(Policy::Lru)
        } else if tag.eq_ignore_ascii_case("mru") {
            Ok(Policy::Mru)
        } else if tag.eq_ignore_ascii_case("lfu") {
            Ok(Policy::Lfu)
        } else {
            Err(ConfigError::UnsupportedPolicy(tag.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// CacheStats
// ---------------------------------------------------------------------------

/// Point-in-time snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lifetime `get` hits.
    pub hits: u64,
    /// Lifetime `get` misses.
    pub misses: u64,
    /// Lifetime capacity evictions (explicit `remove` is not counted).
    pub evictions: u64,
    /// Entries currently cached.
    pub len: usize,
    /// Maximum entries.
    pub capacity: usize,
}

impl CacheStats {
    /// Total `get` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// The active ordering structure; the variant doubles as the policy tag.
#[derive(Debug)]
enum OrderState<K, V> {
    Lru(Chain<Entry<K, V>>),
    Mru(Chain<Entry<K, V>>),
    Lfu(FreqBuckets<Entry<K, V>>),
}

/// Fixed-capacity key-value cache with a pluggable eviction policy.
///
/// Single-threaded by design: operations are plain reference mutations
/// with no suspension points. Callers that share a cache across threads
/// must serialize access; see [`SyncCache`](crate::sync::SyncCache) for
/// the whole-engine lock.
///
/// # Example
///
/// ```
/// use cachex::{Cache, Policy};
///
/// let mut cache = Cache::new(2, Policy::Lfu).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a"); // "a" now at frequency 2
/// cache.put("c", 3); // evicts "b" (frequency 1)
///
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"c"), Some(&3));
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    capacity: usize,
    index: FxHashMap<K, SlotId>,
    order: OrderState<K, V>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries under `policy`.
    ///
    /// Capacity is fixed for the cache's lifetime; there is no resize.
    /// Fails with [`ConfigError::ZeroCapacity`] for `capacity == 0`.
    pub fn new(capacity: usize, policy: Policy) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let order = match policy {
            Policy::Lru => OrderState::Lru(Chain::with_capacity(capacity)),
            Policy::Mru => OrderState::Mru(Chain::with_capacity(capacity)),
            Policy::Lfu => OrderState::Lfu(FreqBuckets::with_capacity(capacity)),
        };
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Ok(Self {
            capacity,
            index,
            order,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Looks up `key`, counting a hit or a miss.
    ///
    /// A hit repositions the entry (recency tail for LRU / MRU, next
    /// frequency bucket for LFU). A miss has no side effect beyond the
    /// counter.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                self.misses += 1;
                return None;
            },
        };
        self.hits += 1;
        match &mut self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => {
                chain.move_to_back(id);
                chain.get(id).map(|entry| &entry.value)
            },
            OrderState::Lfu(buckets) => {
                buckets.touch(id);
                buckets.get(id).map(|entry| &entry.value)
            },
        }
    }

    /// Inserts or updates `key`, returning the displaced value for an
    /// update.
    ///
    /// An update counts as an access for ordering purposes (same
    /// repositioning as a [`get`](Self::get) hit, but no hit is counted).
    /// A fresh insert at capacity first evicts the policy victim from both
    /// the index and the order structure, so insertion itself never fails.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let old = match &mut self.order {
                OrderState::Lru(chain) | OrderState::Mru(chain) => {
                    let entry = chain.get_mut(id).expect("indexed entry missing from chain");
                    let old = std::mem::replace(&mut entry.value, value);
                    chain.move_to_back(id);
                    old
                },
                OrderState::Lfu(buckets) => {
                    let entry = buckets
                        .get_mut(id)
                        .expect("indexed entry missing from buckets");
                    let old = std::mem::replace(&mut entry.value, value);
                    buckets.touch(id);
                    old
                },
            };
            return Some(old);
        }

        if self.index.len() == self.capacity {
            self.evict_one();
        }

        let id = match &mut self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => {
                chain.push_back(Entry::new(key.clone(), value))
            },
            OrderState::Lfu(buckets) => buckets.insert(Entry::new(key.clone(), value)),
        };
        self.index.insert(key, id);
        debug_assert!(self.index.len() <= self.capacity);
        None
    }

    /// Looks up `key` without repositioning and without touching counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        match &self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => {
                chain.get(id).map(|entry| &entry.value)
            },
            OrderState::Lfu(buckets) => buckets.get(id).map(|entry| &entry.value),
        }
    }

    /// Removes `key` and returns its value. Not counted as an eviction.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = match &mut self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => chain.remove(id),
            OrderState::Lfu(buckets) => buckets.remove(id),
        };
        let entry = entry.expect("indexed entry missing from order structure");
        Some(entry.value)
    }

    /// The entry the active policy would evict next, without removing it.
    pub fn peek_victim(&self) -> Option<(&K, &V)> {
        let entry = match &self.order {
            OrderState::Lru(chain) => chain.front(),
            OrderState::Mru(chain) => chain.back(),
            OrderState::Lfu(buckets) => buckets.peek_min(),
        };
        entry.map(|entry| (&entry.key, &entry.value))
    }

    /// Returns `true` if `key` is cached. No repositioning, no counters.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Access frequency of `key` under LFU; `None` for other policies or
    /// an absent key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        match &self.order {
            OrderState::Lfu(buckets) => {
                let id = *self.index.get(key)?;
                buckets.frequency(id)
            },
            OrderState::Lru(_) | OrderState::Mru(_) => None,
        }
    }

    /// Entries currently cached.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum entries, as configured at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The eviction policy chosen at construction.
    pub fn policy(&self) -> Policy {
        match &self.order {
            OrderState::Lru(_) => Policy::Lru,
            OrderState::Mru(_) => Policy::Mru,
            OrderState::Lfu(_) => Policy::Lfu,
        }
    }

    /// Lifetime count of `get` hits.
    pub fn hit_count(&self) -> u64 {
        self.hits
    }

    /// Lifetime count of `get` misses.
    pub fn miss_count(&self) -> u64 {
        self.misses
    }

    /// Lifetime count of capacity evictions.
    pub fn eviction_count(&self) -> u64 {
        self.evictions
    }

    /// Snapshot of all counters plus current occupancy.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            len: self.len(),
            capacity: self.capacity,
        }
    }

    /// Drops all entries. Lifetime counters are preserved.
    pub fn clear(&mut self) {
        self.index.clear();
        match &mut self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => chain.clear(),
            OrderState::Lfu(buckets) => buckets.clear(),
        }
    }

    /// Removes the policy victim from both structures.
    ///
    /// Called only when `len == capacity >= 1`, so an empty order
    /// structure here means the index and the order structure disagree,
    /// an unrecoverable consistency fault.
    fn evict_one(&mut self) {
        let victim = match &mut self.order {
            OrderState::Lru(chain) => chain.pop_front(),
            OrderState::Mru(chain) => chain.pop_back(),
            OrderState::Lfu(buckets) => buckets.pop_min(),
        };
        let victim = victim.expect("eviction requested with empty order structure");
        let unindexed = self.index.remove(&victim.key);
        debug_assert!(unindexed.is_some(), "evicted entry was not indexed");
        self.evictions += 1;
    }

    /// Validates index/order agreement and the order structure's internal
    /// links. Debug and test builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let order_len = match &self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => chain.len(),
            OrderState::Lfu(buckets) => buckets.len(),
        };
        if self.index.len() != order_len {
            return Err(InvariantError::new(format!(
                "index holds {} keys but order structure holds {} entries",
                self.index.len(),
                order_len
            )));
        }
        if order_len > self.capacity {
            return Err(InvariantError::new(format!(
                "size {} exceeds capacity {}",
                order_len, self.capacity
            )));
        }
        for (key, &id) in &self.index {
            let entry_key = match &self.order {
                OrderState::Lru(chain) | OrderState::Mru(chain) => {
                    chain.get(id).map(|entry| &entry.key)
                },
                OrderState::Lfu(buckets) => buckets.get(id).map(|entry| &entry.key),
            };
            match entry_key {
                Some(entry_key) if entry_key == key => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index handle resolves to a different key",
                    ));
                },
                None => {
                    return Err(InvariantError::new(
                        "index handle is dead in the order structure",
                    ));
                },
            }
        }
        match &self.order {
            OrderState::Lru(chain) | OrderState::Mru(chain) => chain.debug_validate_invariants(),
            OrderState::Lfu(buckets) => buckets.debug_validate_invariants(),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
