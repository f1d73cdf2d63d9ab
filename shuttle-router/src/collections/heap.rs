//! Indexed binary min-heap.
//!
//! A plain binary heap can only give up its root. Path search also needs to
//! lower the key of an arbitrary queued vertex, so every entry here records
//! its current slot in the heap array and callers hold a handle to the entry.
//! Handles carry a generation; once an entry leaves the heap its handle is
//! rejected even if the storage is reused by a later insert.

use std::fmt;

/// Handle to an entry of an [`IndexedMinHeap`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    slot: usize,
    generation: u32,
}

impl fmt::Debug for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryHandle({}v{})", self.slot, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// Current index of this entry in `IndexedMinHeap::heap`.
    index: usize,
}

#[derive(Debug, Clone)]
struct Slot<K, V> {
    generation: u32,
    entry: Option<Entry<K, V>>,
}

/// Binary min-heap over `(key, value)` entries supporting removal and key
/// replacement of arbitrary entries in O(log n).
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    /// Dense heap array of slot indices.
    heap: Vec<usize>,
}

impl<K, V> Default for IndexedMinHeap<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            heap: Vec::new(),
        }
    }
}

impl<K: Ord, V> IndexedMinHeap<K, V> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no entries are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queue a new entry and return its handle.
    pub fn insert(&mut self, key: K, value: V) -> EntryHandle {
        let index = self.heap.len();
        let entry = Entry { key, value, index };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot].entry = Some(entry);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                self.slots.len() - 1
            }
        };

        self.heap.push(slot);
        self.sift_up(index);

        EntryHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    /// Returns the minimum entry without removing it.
    pub fn peek_min(&self) -> Option<(&K, &V)> {
        let slot = *self.heap.first()?;
        self.slots[slot].entry.as_ref().map(|e| (&e.key, &e.value))
    }

    /// Remove and return the minimum entry.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Remove an arbitrary entry.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, handle: EntryHandle) -> Option<(K, V)> {
        let index = self.resolve(handle)?.index;
        Some(self.remove_at(index))
    }

    /// Replace the key of an entry and restore heap order, returning the old
    /// key.
    ///
    /// Returns `None` (and leaves the heap untouched) if the handle is stale.
    pub fn replace_key(&mut self, handle: EntryHandle, key: K) -> Option<K> {
        let index = self.resolve(handle)?.index;
        let old = std::mem::replace(&mut self.entry_mut(index).key, key);
        self.repair(index);
        Some(old)
    }

    /// Returns the key of a queued entry.
    pub fn key(&self, handle: EntryHandle) -> Option<&K> {
        self.resolve(handle).map(|e| &e.key)
    }

    /// Returns the value of a queued entry.
    pub fn value(&self, handle: EntryHandle) -> Option<&V> {
        self.resolve(handle).map(|e| &e.value)
    }

    /// Returns true if the handle refers to a queued entry.
    pub fn contains(&self, handle: EntryHandle) -> bool {
        self.resolve(handle).is_some()
    }

    fn resolve(&self, handle: EntryHandle) -> Option<&Entry<K, V>> {
        let slot = self.slots.get(handle.slot)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry(&self, index: usize) -> &Entry<K, V> {
        self.slots[self.heap[index]]
            .entry
            .as_ref()
            .expect("heap array must only reference occupied slots")
    }

    fn entry_mut(&mut self, index: usize) -> &mut Entry<K, V> {
        self.slots[self.heap[index]]
            .entry
            .as_mut()
            .expect("heap array must only reference occupied slots")
    }

    fn key_at(&self, index: usize) -> &K {
        &self.entry(index).key
    }

    fn remove_at(&mut self, index: usize) -> (K, V) {
        let last = self.heap.len() - 1;
        self.swap(index, last);

        let slot = self.heap.pop().expect("heap is non-empty");
        let entry = self.slots[slot]
            .entry
            .take()
            .expect("heap array must only reference occupied slots");
        self.slots[slot].generation = self.slots[slot].generation.wrapping_add(1);
        self.free.push(slot);

        if index < self.heap.len() {
            self.repair(index);
        }

        (entry.key, entry.value)
    }

    /// Move the entry at `index` up or down, whichever restores heap order.
    fn repair(&mut self, index: usize) {
        if index > 0 && self.key_at(index) < self.key_at((index - 1) / 2) {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.key_at(index) >= self.key_at(parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.key_at(right) < self.key_at(left) {
                right
            } else {
                left
            };
            if self.key_at(smaller) >= self.key_at(index) {
                break;
            }
            self.swap(index, smaller);
            index = smaller;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.entry_mut(a).index = a;
        self.entry_mut(b).index = b;
    }
}
