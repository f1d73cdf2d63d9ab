//! Path search over a [`RoutingGraph`](crate::graph::RoutingGraph).
//!
//! Two searches are provided, each in a whole-graph form that labels every
//! reachable vertex and a destination-pruned form that stops once the
//! destination's label is final:
//!
//! - [`min_hop_tree`] / [`min_hop_route`]: breadth-first search for the fewest
//!   edges, breaking ties between equal-hop routes by accumulated weight.
//! - [`min_time_tree`] / [`min_time_route`]: Dijkstra over an indexed min-heap
//!   for the least accumulated weight, breaking ties by fewer edges.
//!
//! Edge weights come from a caller-supplied extractor so the graph stays
//! agnostic of what an edge costs.

mod bfs;
mod dijkstra;
mod tree;

pub use bfs::{min_hop_route, min_hop_tree};
pub use dijkstra::{min_time_route, min_time_tree};
pub use tree::{Label, Reached, Route, SearchTree};
