//! Slotted arena storage for tree nodes.
//!
//! Nodes refer to each other by [`NodeId`] rather than by pointer: a parent
//! owns the ordering of its children's ids, and a child holds a plain id
//! back-reference that is never used to drive destruction. Removing a node
//! vacates its slot; the slot is reused by later insertions.

use std::fmt;

/// Handle to a node stored in an [`Arena`].
///
/// An id is only meaningful for the arena that issued it. Indexing with an
/// id whose slot has been vacated is a contract violation and panics.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Allocation failure raised by [`Arena::try_insert`].
///
/// Allocation is treated as a fallible primitive: growth goes through
/// `try_reserve` and failure is reported rather than aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("arena allocation failed")]
pub struct AllocError;

/// Vec-backed slot arena with free-list reuse.
#[derive(Debug, Clone, Default)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value, reusing a vacant slot when one exists.
    pub fn try_insert(&mut self, value: T) -> Result<NodeId, AllocError> {
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(value);
                NodeId(slot)
            }
            None => {
                self.slots.try_reserve(1).map_err(|_| AllocError)?;
                self.slots.push(Some(value));
                NodeId(self.slots.len() - 1)
            }
        };
        self.len += 1;
        Ok(id)
    }

    /// Remove and return the value at `id`, vacating its slot.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Shared access, `None` for vacant or out-of-range slots.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref()
    }

    /// Mutable access, `None` for vacant or out-of-range slots.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// True if `id` names an occupied slot.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }
}

impl<T> std::ops::Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.slots.get(id.0) {
            Some(Some(value)) => value,
            _ => panic!("arena slot {:?} is vacant", id),
        }
    }
}

impl<T> std::ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots.get_mut(id.0) {
            Some(Some(value)) => value,
            _ => panic!("arena slot {:?} is vacant", id),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut arena = Arena::new();
        let a = arena.try_insert("a").unwrap();
        let b = arena.try_insert("b").unwrap();

        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn remove_vacates_slot() {
        let mut arena = Arena::new();
        let a = arena.try_insert(1).unwrap();

        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.get(a), None);
        assert!(!arena.contains(a));
        assert!(arena.is_empty());
    }

    #[test]
    fn remove_twice_is_none() {
        let mut arena = Arena::new();
        let a = arena.try_insert(1).unwrap();
        arena.remove(a);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.try_insert("a").unwrap();
        let _b = arena.try_insert("b").unwrap();
        arena.remove(a);

        let c = arena.try_insert("c").unwrap();
        assert_eq!(c, a);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = Arena::new();
        let a = arena.try_insert(1).unwrap();
        *arena.get_mut(a).unwrap() = 42;
        assert_eq!(arena[a], 42);
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn index_vacant_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.try_insert(1).unwrap();
        arena.remove(a);
        let _ = arena[a];
    }
}
