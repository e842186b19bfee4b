//! cachex: fixed-capacity in-memory key-value cache with pluggable eviction.
//!
//! The crate is built around a single replacement engine ([`Cache`]) that
//! composes a key → handle index with one of two order-tracking structures:
//! a recency chain (LRU / MRU) or frequency buckets (LFU). The policy is a
//! closed enum fixed at construction, so the eviction rule is exhaustively
//! checked at compile time.
//!
//! ```
//! use cachex::{Cache, Policy};
//!
//! let mut cache = Cache::new(2, Policy::Lru).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts key 2, the least recently used
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! ```

pub mod cache;
pub mod ds;
pub mod entry;
pub mod error;
pub mod prelude;

#[cfg(feature = "concurrency")]
pub mod sync;

pub use cache::{Cache, CacheStats, Policy};
pub use entry::Entry;
pub use error::{ConfigError, InvariantError};

#[cfg(feature = "concurrency")]
pub use sync::SyncCache;
