//! The atomic unit of storage: a cached key-value pair.
//!
//! An [`Entry`] is owned by exactly one node of the active ordering
//! structure ([`Chain`](crate::ds::Chain) for LRU / MRU,
//! [`FreqBuckets`](crate::ds::FreqBuckets) for LFU) and referenced from the
//! index by [`SlotId`](crate::ds::SlotId) handle. Per-policy metadata (the
//! recency links and the frequency counter) lives in the ordering node
//! around the entry, so the entry itself stays policy-agnostic.

/// A key-value pair stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The lookup key. Also needed at eviction time to remove the victim's
    /// index mapping.
    pub key: K,
    /// The cached value.
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key-value pair.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Consumes the entry and returns its key-value pair.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
