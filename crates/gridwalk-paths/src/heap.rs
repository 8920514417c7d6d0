//! Indexed binary min-heap.
//!
//! [`MinHeap`] is an array-backed binary heap that also keeps a map from
//! each queued item's key to its array index. The map gives O(1)
//! [`contains`](MinHeap::contains) and lets [`update`](MinHeap::update) and
//! [`remove_item`](MinHeap::remove_item) find their item without scanning,
//! so both stay O(log n).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::HeapError;

/// An entry that can be queued in a [`MinHeap`].
pub trait HeapItem {
    /// Identity of the item. At most one item per key may be queued.
    type Key: Hash + Eq + Clone;

    /// The item's identity.
    fn key(&self) -> Self::Key;

    /// Whether `self` should be popped before `other`.
    fn less(&self, other: &Self) -> bool;
}

macro_rules! impl_heap_item {
    ($($t:ty),*) => {$(
        impl HeapItem for $t {
            type Key = $t;

            #[inline]
            fn key(&self) -> $t {
                *self
            }

            #[inline]
            fn less(&self, other: &Self) -> bool {
                self < other
            }
        }
    )*};
}

impl_heap_item!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A binary min-heap ordered by [`HeapItem::less`].
pub struct MinHeap<T: HeapItem> {
    values: Vec<T>,
    positions: FxHashMap<T::Key, usize>,
}

impl<T: HeapItem> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HeapItem> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Create an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut positions = FxHashMap::default();
        positions.reserve(capacity);
        Self {
            values: Vec::with_capacity(capacity),
            positions,
        }
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether an item with this key is queued.
    #[inline]
    pub fn contains(&self, key: &T::Key) -> bool {
        self.positions.contains_key(key)
    }

    /// The smallest item, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.values.first()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.values.clear();
        self.positions.clear();
    }

    /// Queue `item`. Fails with [`HeapError::Duplicate`] if an item with the
    /// same key is already queued.
    pub fn insert(&mut self, item: T) -> Result<(), HeapError> {
        let key = item.key();
        if self.positions.contains_key(&key) {
            return Err(HeapError::Duplicate);
        }
        let idx = self.values.len();
        self.values.push(item);
        self.positions.insert(key, idx);
        self.up(idx);
        Ok(())
    }

    /// Remove and return the smallest item.
    ///
    /// Fails with [`HeapError::Empty`] on an empty heap; use
    /// [`pop`](Self::pop) where emptiness is expected.
    pub fn remove_min(&mut self) -> Result<T, HeapError> {
        self.pop().ok_or(HeapError::Empty)
    }

    /// Remove and return the smallest item, or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.swap_remove(0);
        self.positions.remove(&min.key());
        if let Some(first) = self.values.first() {
            self.positions.insert(first.key(), 0);
            self.down(0);
        }
        Some(min)
    }

    /// Replace the queued item that has `item`'s key with `item` and restore
    /// heap order. Use this after an item's priority changed in either
    /// direction.
    pub fn update(&mut self, item: T) -> Result<(), HeapError> {
        let idx = *self
            .positions
            .get(&item.key())
            .ok_or(HeapError::Missing)?;
        self.values[idx] = item;
        let idx = self.up(idx);
        self.down(idx);
        Ok(())
    }

    /// Remove and return the queued item with this key.
    pub fn remove_item(&mut self, key: &T::Key) -> Result<T, HeapError> {
        let idx = self.positions.remove(key).ok_or(HeapError::Missing)?;
        let item = self.values.swap_remove(idx);
        if let Some(moved) = self.values.get(idx) {
            self.positions.insert(moved.key(), idx);
            let idx = self.up(idx);
            self.down(idx);
        }
        Ok(item)
    }

    /// Iterator that pops items in ascending order until the heap is empty.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T> {
        DrainSorted { heap: self }
    }

    // -----------------------------------------------------------------------
    // Sifting
    // -----------------------------------------------------------------------

    fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.positions.insert(self.values[a].key(), a);
        self.positions.insert(self.values[b].key(), b);
    }

    /// Move the item at `idx` towards the root. Returns its final index.
    fn up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.values[idx].less(&self.values[parent]) {
                break;
            }
            self.swap(parent, idx);
            idx = parent;
        }
        idx
    }

    /// Move the item at `idx` towards the leaves.
    fn down(&mut self, mut idx: usize) {
        let len = self.values.len();
        loop {
            let left = idx * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.values[right].less(&self.values[left]) {
                right
            } else {
                left
            };
            if !self.values[smallest].less(&self.values[idx]) {
                break;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }
}

/// Iterator returned by [`MinHeap::drain_sorted`].
pub struct DrainSorted<'a, T: HeapItem> {
    heap: &'a mut MinHeap<T>,
}

impl<T: HeapItem> Iterator for DrainSorted<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}
