//! Stable-handle slot storage.
//!
//! `SlotArena<T>` hands out [`SlotId`] handles that stay valid for the
//! lifetime of the stored value, regardless of how many other values are
//! inserted or removed in between. Freed slots are threaded into a free
//! list through the vacant slots themselves and reused on the next insert,
//! so a cache churning at capacity allocates nothing after warm-up.
//!
//! Both the key index and the ordering structures of the replacement
//! engine traffic in `SlotId`s, never in duplicated owned copies, which is
//! what makes detach / reattach / evict safe without reference counting.

/// Stable handle to a value stored in a [`SlotArena`].
///
/// A `SlotId` is only meaningful to the arena that issued it. After the
/// value is removed the id is dangling; the arena detects stale lookups
/// for slots that are currently vacant, but a reused slot will resolve to
/// the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw slot index (stable while the value is live).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Slab-style arena with O(1) insert, remove, and lookup by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Creates an empty arena with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a vacant slot when
    /// one is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        match self.free_head {
            Some(idx) => {
                let next_free = match self.slots[idx] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
                };
                self.free_head = next_free;
                self.slots[idx] = Slot::Occupied(value);
                SlotId(idx)
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                SlotId(self.slots.len() - 1)
            },
        }
    }

    /// Removes and returns the value at `id`, or `None` if the slot is
    /// vacant or the id is out of range.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        match self.slots.get_mut(id.0) {
            Some(slot @ Slot::Occupied(_)) => {
                let old = std::mem::replace(
                    slot,
                    Slot::Vacant {
                        next_free: self.free_head,
                    },
                );
                self.free_head = Some(id.0);
                self.len -= 1;
                match old {
                    Slot::Occupied(value) => Some(value),
                    Slot::Vacant { .. } => unreachable!(),
                }
            },
            _ => None,
        }
    }

    /// Returns a reference to the value at `id`, if live.
    #[inline]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value at `id`, if live.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `id` refers to a live value.
    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Slot::Occupied(_)))
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops all values and resets the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Iterates over live `(SlotId, &T)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Occupied(value) => Some((SlotId(idx), value)),
            Slot::Vacant { .. } => None,
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.get(a), None);
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn freed_slots_are_reused_lifo() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        arena.remove(a);
        arena.remove(b);

        // Most recently freed slot comes back first.
        let c = arena.insert(3);
        assert_eq!(c.index(), b.index());
        let d = arena.insert(4);
        assert_eq!(d.index(), a.index());
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(9);
        assert_eq!(arena.remove(id), Some(9));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        *arena.get_mut(id).unwrap() = 20;
        assert_eq!(arena.get(id), Some(&20));
    }

    #[test]
    fn iter_skips_vacant_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let _b = arena.insert("b");
        let _c = arena.insert("c");
        arena.remove(a);

        let live: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(live, vec!["b", "c"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(1);
        arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        // Slot indices restart from zero after a clear.
        assert_eq!(arena.insert(3).index(), 0);
    }
}
