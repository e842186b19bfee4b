//! Frequency-bucketed ordering for LFU eviction.
//!
//! Every stored value carries an access-frequency counter (starting at 1,
//! monotone per lifetime). Values sharing a frequency form a doubly-linked
//! bucket, FIFO-ordered: new arrivals append at the tail, eviction pops the
//! head. Buckets hang off an ordered map keyed by frequency, so the
//! eviction candidate is always the head of the first bucket.
//!
//! ```text
//!   buckets: BTreeMap<u64, Bucket>          arena: SlotArena<Node<T>>
//!
//!   freq=1 ──► head ─► [id_4] ◄─► [id_7] ◄─ tail     (evict id_4 first)
//!   freq=3 ──► head ─► [id_2] ◄─ tail
//!   freq=8 ──► head ─► [id_0] ◄─► [id_5] ◄─ tail
//! ```
//!
//! No bucket is ever empty: a bucket emptied by `touch`, `remove`, or
//! `pop_min` is deleted from the map immediately, which keeps the minimum
//! key honest.
//!
//! `touch` and `insert` pay one ordered-map lookup, O(log F) for F
//! distinct live frequencies (bounded by the number of values), in
//! exchange for O(1) eviction-candidate selection in `pop_min`.

use std::collections::BTreeMap;

use crate::ds::arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    freq: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl Bucket {
    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Frequency-ordered storage with O(1) minimum-frequency eviction.
#[derive(Debug)]
pub struct FreqBuckets<T> {
    arena: SlotArena<Node<T>>,
    buckets: BTreeMap<u64, Bucket>,
}

impl<T> FreqBuckets<T> {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            buckets: BTreeMap::new(),
        }
    }

    /// Creates an empty structure with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            buckets: BTreeMap::new(),
        }
    }

    /// Number of stored values across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if no values are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live value.
    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at `id`, if live.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value at `id`, if live.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Current frequency of the value at `id`, if live.
    #[inline]
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.arena.get(id).map(|node| node.freq)
    }

    /// Lowest frequency currently present, if any value is stored.
    #[inline]
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Stores `value` at frequency 1 and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            freq: 1,
            prev: None,
            next: None,
        });
        let bucket = self.buckets.entry(1).or_default();
        Self::append(&mut self.arena, bucket, id);
        id
    }

    /// Records an access: unlinks `id` from its bucket (deleting the bucket
    /// if emptied), increments its frequency, and appends it at the tail of
    /// the next bucket. Returns the new frequency, or `None` for a dead
    /// handle.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let old_freq = self.arena.get(id)?.freq;
        let emptied = {
            let bucket = self
                .buckets
                .get_mut(&old_freq)
                .expect("live entry has no frequency bucket");
            Self::unlink(&mut self.arena, bucket, id);
            bucket.is_empty()
        };
        if emptied {
            self.buckets.remove(&old_freq);
        }

        let new_freq = old_freq.saturating_add(1);
        if let Some(node) = self.arena.get_mut(id) {
            node.freq = new_freq;
        }
        let bucket = self.buckets.entry(new_freq).or_default();
        Self::append(&mut self.arena, bucket, id);
        Some(new_freq)
    }

    /// Removes and returns the eviction candidate: the head (oldest
    /// arrival) of the minimum-frequency bucket. Returns `None` when empty.
    pub fn pop_min(&mut self) -> Option<T> {
        let min_freq = self.min_freq()?;
        let (id, emptied) = {
            let bucket = self
                .buckets
                .get_mut(&min_freq)
                .expect("minimum key vanished");
            let id = bucket.head.expect("empty bucket left in map");
            Self::unlink(&mut self.arena, bucket, id);
            (id, bucket.is_empty())
        };
        if emptied {
            self.buckets.remove(&min_freq);
        }
        self.arena.remove(id).map(|node| node.value)
    }

    /// Eviction candidate without removing it.
    pub fn peek_min(&self) -> Option<&T> {
        self.peek_min_id().and_then(|id| self.get(id))
    }

    /// Handle of the eviction candidate.
    pub fn peek_min_id(&self) -> Option<SlotId> {
        let (_, bucket) = self.buckets.iter().next()?;
        bucket.head
    }

    /// Removes an arbitrary value by handle, deleting its bucket if
    /// emptied. Returns `None` for a dead handle.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let freq = self.arena.get(id)?.freq;
        let emptied = {
            let bucket = self
                .buckets
                .get_mut(&freq)
                .expect("live entry has no frequency bucket");
            Self::unlink(&mut self.arena, bucket, id);
            bucket.is_empty()
        };
        if emptied {
            self.buckets.remove(&freq);
        }
        self.arena.remove(id).map(|node| node.value)
    }

    /// Drops all values and buckets.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.buckets.clear();
    }

    fn append(arena: &mut SlotArena<Node<T>>, bucket: &mut Bucket, id: SlotId) {
        let old_tail = bucket.tail;
        if let Some(node) = arena.get_mut(id) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = arena.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => bucket.head = Some(id),
        }
        bucket.tail = Some(id);
        bucket.len += 1;
    }

    fn unlink(arena: &mut SlotArena<Node<T>>, bucket: &mut Bucket, id: SlotId) {
        let (prev, next) = {
            let node = arena.get(id).expect("bucket node missing from arena");
            (node.prev, node.next)
        };
        match prev {
            Some(prev_id) => {
                if let Some(node) = arena.get_mut(prev_id) {
                    node.next = next;
                }
            },
            None => bucket.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = arena.get_mut(next_id) {
                    node.prev = prev;
                }
            },
            None => bucket.tail = prev,
        }
        if let Some(node) = arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        bucket.len -= 1;
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks every bucket and asserts link consistency, the no-empty-bucket
    /// invariant, and that bucket membership matches node frequencies.
    pub fn debug_validate_invariants(&self) {
        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket left in map for freq {freq}");
            let mut count = 0usize;
            let mut prev = None;
            let mut current = bucket.head;
            while let Some(id) = current {
                let node = self.arena.get(id).expect("bucket node missing from arena");
                assert_eq!(node.freq, freq, "node filed under wrong bucket");
                assert_eq!(node.prev, prev, "prev link mismatch");
                prev = Some(id);
                current = node.next;
                count += 1;
                assert!(count <= bucket.len, "bucket contains a cycle");
            }
            assert_eq!(prev, bucket.tail, "tail does not terminate the bucket");
            assert_eq!(count, bucket.len);
            total += count;
        }
        assert_eq!(total, self.arena.len(), "bucket sizes disagree with arena");
    }
}

impl<T> Default for FreqBuckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_values_start_at_frequency_one() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert("a");
        let b = buckets.insert("b");
        assert_eq!(buckets.frequency(a), Some(1));
        assert_eq!(buckets.frequency(b), Some(1));
        assert_eq!(buckets.min_freq(), Some(1));
        assert_eq!(buckets.len(), 2);
        buckets.debug_validate_invariants();
    }

    #[test]
    fn touch_increments_and_moves_buckets() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert("a");
        let _b = buckets.insert("b");

        assert_eq!(buckets.touch(a), Some(2));
        assert_eq!(buckets.frequency(a), Some(2));
        assert_eq!(buckets.min_freq(), Some(1));

        assert_eq!(buckets.touch(a), Some(3));
        assert_eq!(buckets.frequency(a), Some(3));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn touch_deletes_emptied_bucket() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert(1);
        buckets.touch(a);
        // freq-1 bucket became empty and must be gone.
        assert_eq!(buckets.min_freq(), Some(2));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn pop_min_prefers_lowest_frequency() {
        let mut buckets = FreqBuckets::new();
        let hot = buckets.insert("hot");
        let _cold = buckets.insert("cold");
        buckets.touch(hot);
        buckets.touch(hot);

        assert_eq!(buckets.pop_min(), Some("cold"));
        assert_eq!(buckets.pop_min(), Some("hot"));
        assert_eq!(buckets.pop_min(), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn ties_break_fifo_within_bucket() {
        let mut buckets = FreqBuckets::new();
        buckets.insert("first");
        buckets.insert("second");
        buckets.insert("third");

        assert_eq!(buckets.pop_min(), Some("first"));
        assert_eq!(buckets.pop_min(), Some("second"));
        assert_eq!(buckets.pop_min(), Some("third"));
    }

    #[test]
    fn touch_reenters_bucket_at_tail() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert("a");
        let b = buckets.insert("b");
        buckets.touch(a); // a at freq 2
        buckets.touch(b); // b joins freq 2 after a

        // Both at freq 2; a entered the bucket first.
        assert_eq!(buckets.pop_min(), Some("a"));
        assert_eq!(buckets.pop_min(), Some("b"));
    }

    #[test]
    fn peek_min_does_not_remove() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert(5);
        assert_eq!(buckets.peek_min(), Some(&5));
        assert_eq!(buckets.peek_min_id(), Some(a));
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn remove_arbitrary_handle() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert("a");
        let b = buckets.insert("b");
        buckets.touch(b);

        assert_eq!(buckets.remove(b), Some("b"));
        assert_eq!(buckets.remove(b), None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.min_freq(), Some(1));
        assert!(buckets.contains(a));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn touch_dead_handle_is_none() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert(1);
        buckets.remove(a);
        assert_eq!(buckets.touch(a), None);
        assert_eq!(buckets.frequency(a), None);
    }

    #[test]
    fn get_mut_updates_value_without_reordering() {
        let mut buckets = FreqBuckets::new();
        let a = buckets.insert(10);
        *buckets.get_mut(a).unwrap() = 20;
        assert_eq!(buckets.get(a), Some(&20));
        assert_eq!(buckets.frequency(a), Some(1));
    }

    #[test]
    fn clear_resets_state() {
        let mut buckets = FreqBuckets::new();
        buckets.insert(1);
        buckets.insert(2);
        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.min_freq(), None);
        assert_eq!(buckets.pop_min(), None);
        buckets.debug_validate_invariants();
    }
}
