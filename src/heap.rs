//! Binary min-heap with a caller-supplied comparator and in-place key updates.
//!
//! The position of every item is tracked by its identity key, so
//! [update_item](Heap::update_item) finds an item in O(1) and sifts it to its new place in
//! O(log n).
use crate::{Error, Result};
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// Identity of a heap item. Two items with the same key are the same member of the heap,
/// regardless of what their priorities are.
pub trait HeapItem {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}

pub struct Heap<T: HeapItem, F> {
    items: Vec<T>,
    positions: FxHashMap<T::Key, usize>,
    compare: F,
}

impl<T, F> Heap<T, F>
where
    T: HeapItem,
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(compare: F) -> Heap<T, F> {
        Heap::with_capacity(0, compare)
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Heap<T, F> {
        Heap {
            items: Vec::with_capacity(capacity),
            positions: FxHashMap::default(),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.positions.contains_key(key)
    }

    /// The minimum item, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    /// Inserts an item. Each key may be present at most once; re-prioritising a present item
    /// goes through [update_item](Self::update_item).
    pub fn push(&mut self, item: T) -> Result<()> {
        let key = item.key();
        if self.positions.contains_key(&key) {
            return Err(Error::DuplicateHeapItem);
        }
        let ix = self.items.len();
        self.positions.insert(key, ix);
        self.items.push(item);
        self.sift_up(ix);
        Ok(())
    }

    /// Removes and returns the minimum item according to the comparator.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.items.len().checked_sub(1)?;
        self.swap(0, last);
        let item = self.items.pop()?;
        self.positions.remove(&item.key());
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// Replaces the stored item sharing `item`'s key and restores the heap order around it.
    pub fn update_item(&mut self, item: T) -> Result<()> {
        let ix = *self
            .positions
            .get(&item.key())
            .ok_or(Error::MissingHeapItem)?;
        self.items[ix] = item;
        let ix = self.sift_up(ix);
        self.sift_down(ix);
        Ok(())
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.items.swap(a, b);
        self.positions.insert(self.items[a].key(), a);
        self.positions.insert(self.items[b].key(), b);
    }

    fn sift_up(&mut self, mut ix: usize) -> usize {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if !self.less(ix, parent) {
                break;
            }
            self.swap(ix, parent);
            ix = parent;
        }
        ix
    }

    fn sift_down(&mut self, mut ix: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.swap(ix, smallest);
            ix = smallest;
        }
    }
}
