//! Generic arena for dense, ID-indexed storage of graph nodes.
//!
//! The [`Arena`] provides O(1) insertion and lookup by opaque [`ArenaId`]
//! keys and cache-friendly sequential layout. Endpoints reference each other
//! by ID rather than by back-pointer, so the quasi-cyclic connectivity
//! relation never creates ownership cycles; the arena is owned by the
//! per-unit graph and discarded wholesale with it.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
///
/// Implementors must provide a bijection between `u32` indices and the ID
/// type.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, ID-indexed container.
///
/// Items are always appended (never reordered or removed), making IDs
/// stable for the lifetime of the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocates a new item in the arena and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns a reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(id, item)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct TestId(u32);

    impl ArenaId for TestId {
        fn from_raw(index: u32) -> Self {
            Self(index)
        }

        fn as_raw(self) -> u32 {
            self.0
        }
    }

    #[test]
    fn alloc_and_get() {
        let mut arena: Arena<TestId, &str> = Arena::new();
        let a = arena.alloc("first");
        let b = arena.alloc("second");
        assert_eq!(arena[a], "first");
        assert_eq!(arena[b], "second");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn ids_are_sequential() {
        let mut arena: Arena<TestId, i32> = Arena::new();
        assert_eq!(arena.alloc(1).as_raw(), 0);
        assert_eq!(arena.alloc(2).as_raw(), 1);
    }

    #[test]
    fn get_mut_updates() {
        let mut arena: Arena<TestId, i32> = Arena::new();
        let id = arena.alloc(10);
        arena[id] += 5;
        assert_eq!(arena[id], 15);
    }

    #[test]
    fn iter_in_allocation_order() {
        let mut arena: Arena<TestId, char> = Arena::new();
        arena.alloc('a');
        arena.alloc('b');
        let collected: Vec<char> = arena.iter().map(|(_, c)| *c).collect();
        assert_eq!(collected, vec!['a', 'b']);
    }

    #[test]
    fn empty_arena() {
        let arena: Arena<TestId, i32> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
    }
}
