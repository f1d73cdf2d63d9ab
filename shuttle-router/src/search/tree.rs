//! Search labels and parent trees shared by both searches.

use std::collections::HashMap;

use crate::graph::{EdgeId, VertexId};

/// Accumulated cost of reaching a vertex.
///
/// Labels order lexicographically by `time`, then `hops`, which is exactly
/// the minimum-time-then-fewest-edges preference of the time search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    /// Sum of edge weights from the source.
    pub time: u64,
    /// Number of edges from the source.
    pub hops: u32,
}

impl Label {
    /// Label of the vertex reached by following one more edge of `weight`.
    pub fn extend(self, weight: u64) -> Self {
        Self {
            time: self.time.saturating_add(weight),
            hops: self.hops + 1,
        }
    }
}

/// Best-known label of a vertex and the edge it was reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reached {
    pub label: Label,
    /// `(previous vertex, edge taken)`; `None` for the source.
    pub parent: Option<(VertexId, EdgeId)>,
}

/// A path through the graph found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Vertices from source to destination inclusive.
    pub vertices: Vec<VertexId>,
    /// Edges in travel order; always one fewer than `vertices`.
    pub edges: Vec<EdgeId>,
    /// Label of the destination.
    pub label: Label,
}

impl Route {
    /// A route that stays at `vertex`.
    pub fn trivial(vertex: VertexId) -> Self {
        Self {
            vertices: vec![vertex],
            edges: Vec::new(),
            label: Label::default(),
        }
    }

    pub fn source(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn destination(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }
}

/// Labels and parents of every vertex a search touched.
///
/// Vertices the search never reached are absent.
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: VertexId,
    reached: HashMap<VertexId, Reached>,
}

impl SearchTree {
    pub(crate) fn new(source: VertexId) -> Self {
        Self {
            source,
            reached: HashMap::new(),
        }
    }

    pub(crate) fn reach(
        &mut self,
        vertex: VertexId,
        label: Label,
        parent: Option<(VertexId, EdgeId)>,
    ) {
        self.reached.insert(vertex, Reached { label, parent });
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Label of `vertex`, or `None` if the search never reached it.
    pub fn label(&self, vertex: VertexId) -> Option<Label> {
        self.reached.get(&vertex).map(|r| r.label)
    }

    pub fn get(&self, vertex: VertexId) -> Option<&Reached> {
        self.reached.get(&vertex)
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.reached.contains_key(&vertex)
    }

    /// Number of vertices reached, the source included.
    pub fn len(&self) -> usize {
        self.reached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    /// All reached vertices with their labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = (VertexId, Label)> + '_ {
        self.reached.iter().map(|(v, r)| (*v, r.label))
    }

    /// Walk the parent chain from `destination` back to the source.
    ///
    /// Returns `None` if `destination` was not reached or its chain does not
    /// end at the source.
    pub fn route_to(&self, destination: VertexId) -> Option<Route> {
        let label = self.label(destination)?;
        let mut vertices = vec![destination];
        let mut edges = Vec::new();
        let mut current = destination;

        while let Some((previous, edge)) = self.reached.get(&current)?.parent {
            // A chain longer than the tree means a cycle
            if edges.len() >= self.reached.len() {
                return None;
            }
            edges.push(edge);
            vertices.push(previous);
            current = previous;
        }

        if current != self.source {
            return None;
        }

        vertices.reverse();
        edges.reverse();
        Some(Route {
            vertices,
            edges,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoutingGraph;

    #[test]
    fn labels_order_by_time_then_hops() {
        let fast_long = Label { time: 14, hops: 3 };
        let fast_short = Label { time: 14, hops: 2 };
        let slow = Label { time: 19, hops: 1 };
        assert!(fast_short < fast_long);
        assert!(fast_long < slow);
    }

    #[test]
    fn extend_adds_weight_and_hop() {
        let label = Label::default().extend(3).extend(8);
        assert_eq!(label, Label { time: 11, hops: 2 });
        assert_eq!(Label { time: u64::MAX, hops: 0 }.extend(1).time, u64::MAX);
    }

    #[test]
    fn route_to_walks_parents() {
        let mut g: RoutingGraph<(), ()> = RoutingGraph::new();
        let a = g.insert_vertex(());
        let b = g.insert_vertex(());
        let c = g.insert_vertex(());
        let ab = g.insert_edge(a, b, ()).unwrap();
        let bc = g.insert_edge(b, c, ()).unwrap();

        let mut tree = SearchTree::new(a);
        tree.reach(a, Label::default(), None);
        tree.reach(b, Label { time: 2, hops: 1 }, Some((a, ab)));
        tree.reach(c, Label { time: 5, hops: 2 }, Some((b, bc)));

        let route = tree.route_to(c).unwrap();
        assert_eq!(route.vertices, vec![a, b, c]);
        assert_eq!(route.edges, vec![ab, bc]);
        assert_eq!(route.label, Label { time: 5, hops: 2 });
        assert_eq!(route.source(), a);
        assert_eq!(route.destination(), c);

        assert_eq!(tree.route_to(a), Some(Route::trivial(a)));
    }

    #[test]
    fn unreached_destination_has_no_route() {
        let mut g: RoutingGraph<(), ()> = RoutingGraph::new();
        let a = g.insert_vertex(());
        let b = g.insert_vertex(());

        let mut tree = SearchTree::new(a);
        tree.reach(a, Label::default(), None);
        assert!(tree.route_to(b).is_none());
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(b));
    }

    #[test]
    fn chain_not_ending_at_source_is_rejected() {
        let mut g: RoutingGraph<(), ()> = RoutingGraph::new();
        let a = g.insert_vertex(());
        let b = g.insert_vertex(());
        let c = g.insert_vertex(());
        let bc = g.insert_edge(b, c, ()).unwrap();

        let mut tree = SearchTree::new(a);
        tree.reach(b, Label::default(), None);
        tree.reach(c, Label { time: 1, hops: 1 }, Some((b, bc)));
        assert!(tree.route_to(c).is_none());
    }
}
