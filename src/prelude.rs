//! Convenience re-exports for typical usage.

pub use crate::cache::{Cache, CacheStats, Policy};
pub use crate::ds::{Chain, FreqBuckets, SlotArena, SlotId};
pub use crate::entry::Entry;
pub use crate::error::{ConfigError, InvariantError};

#[cfg(feature = "concurrency")]
pub use crate::sync::SyncCache;
