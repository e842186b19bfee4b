//! Order-tracking data structures backing the replacement engine.

pub mod arena;
pub mod chain;
pub mod freq_buckets;

pub use arena::{SlotArena, SlotId};
pub use chain::Chain;
pub use freq_buckets::FreqBuckets;
