use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::errors::PlinthError;

/// A binary min-heap augmented with a position index, so that any item
/// on the heap can be deleted or re-ordered in O(log n), not just the
/// minimum.
///
/// The ordering is a three-way comparison supplied at construction;
/// the heap simply surfaces whichever item the comparison ranks least.
/// Items act as their own keys in the position index, so they must be
/// hashable and cheap to copy. For anything bigger, store small
/// handles (e.g. indices into an external table) and let the
/// comparison read the real keys through them; `update` re-places an
/// item after those keys change.
///
/// Not synchronized. Intermediate states during a mutation are not
/// valid heaps, so concurrent use needs an exclusive lock around the
/// whole structure.
pub struct IndexedHeap<T: Eq + Hash + Copy, C: Fn(&T, &T) -> Ordering> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
    compare: C,
}

impl<T: Eq + Hash + Copy, C: Fn(&T, &T) -> Ordering> IndexedHeap<T, C> {
    /// Create an empty heap ordered by `compare`.
    pub fn new(compare: C) -> IndexedHeap<T, C> {
        IndexedHeap::with_capacity(compare, 0)
    }

    /// Create an empty heap with room reserved for `capacity` items.
    ///
    /// The capacity is an allocation hint, not a bound.
    pub fn with_capacity(compare: C, capacity: usize) -> IndexedHeap<T, C> {
        IndexedHeap {
            items: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: T) -> bool {
        self.positions.contains_key(&item)
    }

    /// The least item, without removing it.
    pub fn peek_min(&self) -> Option<&T> {
        self.items.first()
    }

    /// Visit the items in backing-array order. This is a valid heap
    /// order but otherwise unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Add `item` to the heap.
    pub fn insert(&mut self, item: T) -> Result<(), PlinthError> {
        if self.positions.contains_key(&item) {
            return Err(PlinthError::DuplicateItem);
        }
        let pos = self.items.len();
        self.items.push(item);
        self.positions.insert(item, pos);
        self.sift_up(pos);
        Ok(())
    }

    /// Remove and return the least item.
    pub fn extract_min(&mut self) -> Result<T, PlinthError> {
        if self.items.is_empty() {
            return Err(PlinthError::EmptyHeap);
        }
        let min = self.items[0];
        self.positions.remove(&min);
        let last = self.items.pop().unwrap();
        if !self.items.is_empty() {
            self.place(last, 0);
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Remove `item` from anywhere on the heap. The last item of the
    /// backing array takes over the freed slot and is sifted, in
    /// either direction, to a position that restores heap order.
    pub fn delete(&mut self, item: T) -> Result<(), PlinthError> {
        let pos = match self.positions.get(&item) {
            Some(p) => *p,
            None => return Err(PlinthError::NotFound),
        };
        self.positions.remove(&item);
        let last = self.items.pop().unwrap();
        if pos < self.items.len() {
            self.place(last, pos);
            self.relocate(pos);
        }
        Ok(())
    }

    /// Re-place `item` after the state its ordering depends on has
    /// changed. At most one of the two sift directions moves anything.
    pub fn update(&mut self, item: T) -> Result<(), PlinthError> {
        let pos = match self.positions.get(&item) {
            Some(p) => *p,
            None => return Err(PlinthError::NotFound),
        };
        self.relocate(pos);
        Ok(())
    }

    fn relocate(&mut self, pos: usize) {
        let pos = self.sift_up(pos);
        self.sift_down(pos);
    }

    /// Move the item at `pos` toward the root until its parent no
    /// longer out-ranks it. Returns its resting position. Ties never
    /// swap.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if (self.compare)(&self.items[parent], &self.items[pos]) != Ordering::Greater {
                break;
            }
            let p_item = self.items[parent];
            let item = self.items[pos];
            self.place(item, parent);
            self.place(p_item, pos);
            pos = parent;
        }
        pos
    }

    /// Move the item at `pos` toward the leaves until neither child
    /// out-ranks it. With two children the left one is taken whenever
    /// the two are tied; the right one only when it is strictly less
    /// than the left.
    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = pos * 2 + 1;
            let right = left + 1;
            if left >= self.items.len() {
                break;
            }
            let item = self.items[pos];
            let l_item = self.items[left];
            if right >= self.items.len() {
                // a lone left child is the last node of the tree
                if (self.compare)(&item, &l_item) == Ordering::Greater {
                    self.place(item, left);
                    self.place(l_item, pos);
                }
                break;
            }
            let r_item = self.items[right];
            if (self.compare)(&item, &l_item) == Ordering::Greater
                && (self.compare)(&l_item, &r_item) != Ordering::Greater
            {
                self.place(item, left);
                self.place(l_item, pos);
                pos = left;
            } else if (self.compare)(&item, &r_item) == Ordering::Greater
                && (self.compare)(&r_item, &l_item) == Ordering::Less
            {
                self.place(item, right);
                self.place(r_item, pos);
                pos = right;
            } else {
                break;
            }
        }
    }

    fn place(&mut self, item: T, pos: usize) {
        self.items[pos] = item;
        self.positions.insert(item, pos);
    }
}
