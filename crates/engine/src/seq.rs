//! Growable sequence with an explicit doubling policy.
//!
//! Rows, cells and the table itself all sit on `Seq`. Capacity doubles whenever
//! an insertion finds the buffer full, and removals never give capacity back.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seq<T> {
    items: Vec<T>,
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Seq<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Make room for `needed` elements, doubling from the current capacity.
    fn reserve_doubling(&mut self, needed: usize) {
        let cap = self.items.capacity();
        if needed <= cap {
            return;
        }
        let mut target = cap.max(1);
        while target < needed {
            target *= 2;
        }
        self.items.reserve_exact(target - self.items.len());
    }

    pub fn append(&mut self, item: T) {
        self.reserve_doubling(self.items.len() + 1);
        self.items.push(item);
    }

    /// Insert at `index`, shifting later elements right. An index past the end appends.
    pub fn insert_at(&mut self, index: usize, item: T) {
        self.reserve_doubling(self.items.len() + 1);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Remove the element at `index`, shifting later elements left.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Grow to `len` elements, filling with `f`. Never shrinks.
    pub fn grow_with(&mut self, len: usize, f: impl FnMut() -> T) {
        if len > self.items.len() {
            self.reserve_doubling(len);
            self.items.resize_with(len, f);
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> Index<usize> for Seq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Seq<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Seq::new();
        for item in iter {
            seq.append(item);
        }
        seq
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
