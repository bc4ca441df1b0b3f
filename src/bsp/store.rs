// src/bsp/store.rs

use std::ops::{Index, IndexMut};

/// Append-only output array that grows its backing buffer in fixed chunks.
///
/// Records are addressed by the index `push` hands back; no reference into
/// the store survives an append, so a growth step can never leave a caller
/// holding a dangling slot. Go back through the index after anything that
/// may have appended.
#[derive(Debug, Clone)]
pub struct GrowableStore<T> {
    items: Vec<T>,
    chunk: usize,
}

impl<T> GrowableStore<T> {
    pub fn new(chunk: usize) -> Self {
        GrowableStore {
            items: Vec::new(),
            chunk: chunk.max(1),
        }
    }

    /// Grows the backing buffer to the next chunk boundary at or above
    /// `needed`. Allocation failure aborts the process.
    pub fn ensure_capacity(&mut self, needed: usize) {
        if needed <= self.items.capacity() {
            return;
        }
        let target = needed.div_ceil(self.chunk) * self.chunk;
        self.items.reserve_exact(target - self.items.len());
    }

    /// Appends a record and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.items.len();
        self.ensure_capacity(index + 1);
        self.items.push(value);
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
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

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Drops every record but keeps the allocation for the next pass.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Index<usize> for GrowableStore<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for GrowableStore<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowableStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
