//! Positional sequence: a linked list with stable O(1) handles.
//!
//! Elements live in a dense arena and are threaded together by index links,
//! so removal by handle never scans the sequence. Every slot carries a
//! generation that is bumped when the slot is vacated; a `Position` taken
//! before removal therefore never resolves to whatever later reuses the slot.

use std::fmt;

/// Handle to an element of a [`PositionalSequence`].
///
/// A position stays valid until its element is removed. Afterwards every
/// lookup through it returns `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    index: usize,
    generation: u32,
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    generation: u32,
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered sequence with O(1) append and O(1) removal by position.
#[derive(Debug, Clone)]
pub struct PositionalSequence<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for PositionalSequence<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> PositionalSequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its position.
    pub fn push_back(&mut self, value: T) -> Position {
        let prev = self.tail;
        let index = match self.free.pop() {
            Some(index) => {
                let node = &mut self.nodes[index];
                node.value = Some(value);
                node.prev = prev;
                node.next = None;
                index
            }
            None => {
                self.nodes.push(Node {
                    generation: 0,
                    value: Some(value),
                    prev,
                    next: None,
                });
                self.nodes.len() - 1
            }
        };

        match prev {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        Position {
            index,
            generation: self.nodes[index].generation,
        }
    }

    /// Remove the element at `position`, returning it.
    ///
    /// Returns `None` if the position has already been removed.
    pub fn remove(&mut self, position: Position) -> Option<T> {
        self.resolve(position)?;

        let node = &mut self.nodes[position.index];
        let value = node.value.take();
        let (prev, next) = (node.prev.take(), node.next.take());
        node.generation = node.generation.wrapping_add(1);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.free.push(position.index);
        self.len -= 1;
        value
    }

    /// Returns the element at `position`, if it is still live.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.resolve(position)?;
        self.nodes[position.index].value.as_ref()
    }

    /// Returns the element at `position` mutably, if it is still live.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.resolve(position)?;
        self.nodes[position.index].value.as_mut()
    }

    /// Returns true if `position` refers to a live element.
    pub fn contains(&self, position: Position) -> bool {
        self.resolve(position).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over `(position, element)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            cursor: self.head,
        }
    }

    /// Visit every element in insertion order.
    pub fn for_each(&self, mut visitor: impl FnMut(Position, &T)) {
        for (position, value) in self.iter() {
            visitor(position, value);
        }
    }

    fn resolve(&self, position: Position) -> Option<()> {
        let node = self.nodes.get(position.index)?;
        (node.generation == position.generation && node.value.is_some()).then_some(())
    }
}

/// Iterator over a [`PositionalSequence`].
pub struct Iter<'a, T> {
    seq: &'a PositionalSequence<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Position, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = &self.seq.nodes[index];
        self.cursor = node.next;
        let position = Position {
            index,
            generation: node.generation,
        };
        node.value.as_ref().map(|value| (position, value))
    }
}

impl<'a, T> IntoIterator for &'a PositionalSequence<T> {
    type Item = (Position, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
