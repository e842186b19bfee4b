//! Doubly-linked recency chain backed by [`SlotArena`].
//!
//! The recency order of LRU and MRU caches is a single acyclic chain from
//! the coldest entry (head) to the hottest (tail). Nodes live in a
//! `SlotArena` and link each other by [`SlotId`], which gives stable
//! handles and O(1) splice / move operations without raw pointers.
//!
//! ```text
//!   head ──► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!            oldest                   newest
//! ```
//!
//! - `push_back`: append the newest entry, O(1)
//! - `pop_front` / `pop_back`: evict the LRU / MRU endpoint, O(1)
//! - `move_to_back`: reposition on access, O(1)
//! - `remove`: unlink an arbitrary node, O(1)
//!
//! Detaching the sole element leaves the chain empty (both endpoints
//! `None`); detaching an endpoint promotes its neighbor.

use crate::ds::arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly-linked chain with stable [`SlotId`] handles.
#[derive(Debug)]
pub struct Chain<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> Chain<T> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty chain with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Number of nodes in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node of this chain.
    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value at the head (oldest position), if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Value at the tail (newest position), if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Handle of the head node.
    #[inline]
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Handle of the tail node.
    #[inline]
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value stored at `id`, if present.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value at `id`, if present.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Appends `value` at the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Prepends `value` at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks node `id` and returns its value, or `None` if `id` is not a
    /// live node.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves node `id` to the tail (newest position).
    ///
    /// No-op when `id` is already the tail. Returns `false` if `id` is not
    /// a live node.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.tail == Some(id) {
            return true;
        }
        let _ = self.detach(id);
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        true
    }

    /// Moves node `id` to the head (oldest position). Symmetric counterpart
    /// of [`move_to_back`](Self::move_to_back).
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        let _ = self.detach(id);
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = old_head;
            node.prev = None;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    /// Drops all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from head (oldest) to tail (newest).
    pub fn iter(&self) -> ChainIter<'_, T> {
        ChainIter {
            chain: self,
            current: self.head,
        }
    }

    /// Splices `id` out of the chain, patching neighbor links and the
    /// endpoints. The node stays in the arena with cleared links.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks the chain in both directions and asserts link consistency.
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none() && self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("chain node missing from arena");
            assert_eq!(node.prev, prev, "prev link mismatch");
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "chain contains a cycle");
        }
        assert_eq!(prev, self.tail, "tail does not terminate the chain");
        assert_eq!(count, self.len());
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over chain values from head to tail.
pub struct ChainIter<'a, T> {
    chain: &'a Chain<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.chain.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot<T: Copy>(chain: &Chain<T>) -> Vec<T> {
        chain.iter().copied().collect()
    }

    #[test]
    fn push_back_keeps_insertion_order() {
        let mut chain = Chain::new();
        chain.push_back(1);
        chain.push_back(2);
        chain.push_back(3);
        assert_eq!(snapshot(&chain), vec![1, 2, 3]);
        assert_eq!(chain.front(), Some(&1));
        assert_eq!(chain.back(), Some(&3));
        chain.debug_validate_invariants();
    }

    #[test]
    fn pop_front_and_back() {
        let mut chain = Chain::new();
        chain.push_back("a");
        chain.push_back("b");
        chain.push_back("c");

        assert_eq!(chain.pop_front(), Some("a"));
        assert_eq!(chain.pop_back(), Some("c"));
        assert_eq!(snapshot(&chain), vec!["b"]);

        assert_eq!(chain.pop_front(), Some("b"));
        assert!(chain.is_empty());
        assert_eq!(chain.pop_front(), None);
        assert_eq!(chain.pop_back(), None);
        chain.debug_validate_invariants();
    }

    #[test]
    fn move_to_back_repositions_head_and_middle() {
        let mut chain = Chain::new();
        let a = chain.push_back("a");
        let b = chain.push_back("b");
        let c = chain.push_back("c");

        assert!(chain.move_to_back(a));
        assert_eq!(snapshot(&chain), vec!["b", "c", "a"]);

        assert!(chain.move_to_back(b));
        assert_eq!(snapshot(&chain), vec!["c", "a", "b"]);

        // Tail move is a no-op.
        assert!(chain.move_to_back(b));
        assert_eq!(snapshot(&chain), vec!["c", "a", "b"]);

        assert!(chain.contains(c));
        chain.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_is_symmetric() {
        let mut chain = Chain::new();
        let _a = chain.push_back(1);
        let b = chain.push_back(2);
        let c = chain.push_back(3);

        assert!(chain.move_to_front(c));
        assert_eq!(snapshot(&chain), vec![3, 1, 2]);
        assert!(chain.move_to_front(b));
        assert_eq!(snapshot(&chain), vec![2, 3, 1]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn move_on_dead_handle_returns_false() {
        let mut chain = Chain::new();
        let a = chain.push_back(1);
        chain.remove(a);
        assert!(!chain.move_to_back(a));
        assert!(!chain.move_to_front(a));
    }

    #[test]
    fn remove_middle_and_endpoints() {
        let mut chain = Chain::new();
        let a = chain.push_back("a");
        let b = chain.push_back("b");
        let c = chain.push_back("c");

        assert_eq!(chain.remove(b), Some("b"));
        assert_eq!(snapshot(&chain), vec!["a", "c"]);

        // Removing an endpoint promotes its neighbor.
        assert_eq!(chain.remove(a), Some("a"));
        assert_eq!(chain.front(), Some(&"c"));
        assert_eq!(chain.back(), Some(&"c"));

        // Removing the sole element empties the chain.
        assert_eq!(chain.remove(c), Some("c"));
        assert_eq!(chain.front_id(), None);
        assert_eq!(chain.back_id(), None);
        chain.debug_validate_invariants();
    }

    #[test]
    fn sole_element_move_is_noop() {
        let mut chain = Chain::new();
        let a = chain.push_back(42);
        assert!(chain.move_to_back(a));
        assert!(chain.move_to_front(a));
        assert_eq!(snapshot(&chain), vec![42]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn push_front_prepends() {
        let mut chain = Chain::new();
        chain.push_back(2);
        chain.push_front(1);
        assert_eq!(snapshot(&chain), vec![1, 2]);
    }

    #[test]
    fn get_mut_updates_value() {
        let mut chain = Chain::new();
        let id = chain.push_back(10);
        *chain.get_mut(id).unwrap() = 20;
        assert_eq!(chain.get(id), Some(&20));
    }

    #[test]
    fn clear_resets_endpoints() {
        let mut chain = Chain::new();
        chain.push_back(1);
        chain.push_back(2);
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.front(), None);
        assert_eq!(chain.back(), None);
        chain.debug_validate_invariants();
    }
}
