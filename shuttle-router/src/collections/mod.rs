//! Handle-based containers backing the routing graph and path search.

mod heap;
mod positional;

pub use heap::{EntryHandle, IndexedMinHeap};
pub use positional::{Iter, Position, PositionalSequence};
