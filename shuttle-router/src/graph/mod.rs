//! Directed routing graph with handle-based vertices and edges.
//!
//! Vertices and edges live in two positional sequences, so inserting or
//! removing either is O(1) apart from adjacency bookkeeping. Every vertex
//! keeps outgoing and incoming maps from neighbour to edge, giving O(1)
//! `get_edge` and O(degree) vertex removal.
//!
//! At most one edge exists per ordered (origin, destination) pair.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::collections::{Position, PositionalSequence};

/// Handle to a vertex of a [`RoutingGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(Position);

/// Handle to an edge of a [`RoutingGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(Position);

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({:?})", self.0)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({:?})", self.0)
    }
}

#[derive(Debug, Clone)]
struct Vertex<V> {
    element: V,
    /// neighbour -> edge where this vertex is the origin
    outgoing: HashMap<VertexId, EdgeId>,
    /// neighbour -> edge where this vertex is the destination
    incoming: HashMap<VertexId, EdgeId>,
}

#[derive(Debug, Clone)]
struct Edge<E> {
    element: E,
    origin: VertexId,
    destination: VertexId,
}

/// A directed graph storing a `V` on every vertex and an `E` on every edge.
#[derive(Debug, Clone)]
pub struct RoutingGraph<V, E> {
    vertices: PositionalSequence<Vertex<V>>,
    edges: PositionalSequence<Edge<E>>,
}

impl<V, E> Default for RoutingGraph<V, E> {
    fn default() -> Self {
        Self {
            vertices: PositionalSequence::new(),
            edges: PositionalSequence::new(),
        }
    }
}

impl<V, E> RoutingGraph<V, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a vertex holding `element`.
    pub fn insert_vertex(&mut self, element: V) -> VertexId {
        VertexId(self.vertices.push_back(Vertex {
            element,
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }))
    }

    /// Remove a vertex together with every edge incident to it.
    ///
    /// Returns `None` if the vertex was already removed.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Option<V> {
        let v = self.vertices.get(vertex.0)?;
        let incident: Vec<EdgeId> = v
            .outgoing
            .values()
            .chain(v.incoming.values())
            .copied()
            .collect();

        trace!(?vertex, edges = incident.len(), "removing vertex");

        // Edges go first so no adjacency map is left pointing at a dead vertex
        for edge in incident {
            self.remove_edge(edge);
        }

        self.vertices.remove(vertex.0).map(|v| v.element)
    }

    /// Add a directed edge from `origin` to `destination`.
    ///
    /// Returns `None` without changing the graph if either endpoint is not a
    /// live vertex or an edge already exists for the ordered pair.
    pub fn insert_edge(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        element: E,
    ) -> Option<EdgeId> {
        if !self.vertices.contains(destination.0) {
            return None;
        }
        if self.vertices.get(origin.0)?.outgoing.contains_key(&destination) {
            return None;
        }

        let edge = EdgeId(self.edges.push_back(Edge {
            element,
            origin,
            destination,
        }));

        self.vertex_mut(origin).outgoing.insert(destination, edge);
        self.vertex_mut(destination).incoming.insert(origin, edge);
        Some(edge)
    }

    /// Remove an edge and its adjacency entries.
    ///
    /// Returns `None` if the edge was already removed.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Option<E> {
        let removed = self.edges.remove(edge.0)?;
        self.vertex_mut(removed.origin)
            .outgoing
            .remove(&removed.destination);
        self.vertex_mut(removed.destination)
            .incoming
            .remove(&removed.origin);
        Some(removed.element)
    }

    /// Returns the edge from `origin` to `destination`, if any.
    pub fn get_edge(&self, origin: VertexId, destination: VertexId) -> Option<EdgeId> {
        self.vertices
            .get(origin.0)?
            .outgoing
            .get(&destination)
            .copied()
    }

    /// Edges leaving `vertex`, in no particular order.
    ///
    /// Empty if the vertex is not live.
    pub fn outgoing_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertices
            .get(vertex.0)
            .into_iter()
            .flat_map(|v| v.outgoing.values().copied())
    }

    /// Edges arriving at `vertex`, in no particular order.
    ///
    /// Empty if the vertex is not live.
    pub fn incoming_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertices
            .get(vertex.0)
            .into_iter()
            .flat_map(|v| v.incoming.values().copied())
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.vertices.get(vertex.0).map_or(0, |v| v.outgoing.len())
    }

    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.vertices.get(vertex.0).map_or(0, |v| v.incoming.len())
    }

    /// Returns the endpoint of `edge` opposite `vertex`.
    ///
    /// Returns `None` if `edge` is not incident to `vertex` (or is dead).
    pub fn opposite(&self, vertex: VertexId, edge: EdgeId) -> Option<VertexId> {
        let e = self.edges.get(edge.0)?;
        if e.origin == vertex {
            Some(e.destination)
        } else if e.destination == vertex {
            Some(e.origin)
        } else {
            None
        }
    }

    /// Returns `(origin, destination)` of a live edge.
    pub fn endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(edge.0).map(|e| (e.origin, e.destination))
    }

    pub fn vertex(&self, vertex: VertexId) -> Option<&V> {
        self.vertices.get(vertex.0).map(|v| &v.element)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&E> {
        self.edges.get(edge.0).map(|e| &e.element)
    }

    pub fn edge_mut(&mut self, edge: EdgeId) -> Option<&mut E> {
        self.edges.get_mut(edge.0).map(|e| &mut e.element)
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(vertex.0)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(edge.0)
    }

    /// All live vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.vertices
            .iter()
            .map(|(position, v)| (VertexId(position), &v.element))
    }

    /// All live edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.edges
            .iter()
            .map(|(position, e)| (EdgeId(position), &e.element))
    }

    fn vertex_mut(&mut self, vertex: VertexId) -> &mut Vertex<V> {
        self.vertices
            .get_mut(vertex.0)
            .expect("edge endpoint must be a live vertex")
    }

    /// Panics unless every adjacency map agrees with the edge set.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut adjacency_entries = 0;
        for (position, v) in self.vertices.iter() {
            let id = VertexId(position);
            for (neighbour, edge) in &v.outgoing {
                assert_eq!(self.endpoints(*edge), Some((id, *neighbour)));
                adjacency_entries += 1;
            }
            for (neighbour, edge) in &v.incoming {
                assert_eq!(self.endpoints(*edge), Some((*neighbour, id)));
                adjacency_entries += 1;
            }
        }
        for (position, e) in self.edges.iter() {
            let id = EdgeId(position);
            assert!(self.contains_vertex(e.origin), "edge {id:?} has dead origin");
            assert!(
                self.contains_vertex(e.destination),
                "edge {id:?} has dead destination"
            );
            assert_eq!(self.get_edge(e.origin, e.destination), Some(id));
        }
        assert_eq!(adjacency_entries, 2 * self.edges.len());
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        AddVertex,
        AddEdge(usize, usize),
        RemoveVertex(usize),
        RemoveEdge(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            2 => Just(Op::AddVertex),
            3 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::AddEdge(a, b)),
            1 => any::<usize>().prop_map(Op::RemoveVertex),
            1 => any::<usize>().prop_map(Op::RemoveEdge),
        ]
    }

    proptest! {
        /// Adjacency maps stay consistent with the edge set under any
        /// sequence of structural edits, and duplicate pairs never get in
        #[test]
        fn stays_consistent(ops in prop::collection::vec(op(), 0..96)) {
            let mut g: RoutingGraph<u32, u32> = RoutingGraph::new();
            let mut vertices: Vec<VertexId> = Vec::new();
            let mut next = 0u32;

            for op in ops {
                match op {
                    Op::AddVertex => {
                        vertices.push(g.insert_vertex(next));
                        next += 1;
                    }
                    Op::AddEdge(a, b) if !vertices.is_empty() => {
                        let u = vertices[a % vertices.len()];
                        let v = vertices[b % vertices.len()];
                        let before = g.edge_count();
                        let existed = g.get_edge(u, v).is_some();
                        let inserted = g.insert_edge(u, v, next);
                        next += 1;
                        prop_assert_eq!(inserted.is_none(), existed);
                        prop_assert_eq!(g.edge_count(), before + usize::from(!existed));
                    }
                    Op::RemoveVertex(i) if !vertices.is_empty() => {
                        let v = vertices.swap_remove(i % vertices.len());
                        prop_assert!(g.remove_vertex(v).is_some());
                        prop_assert_eq!(g.outgoing_edges(v).count(), 0);
                    }
                    Op::RemoveEdge(i) => {
                        let edges: Vec<EdgeId> = g.edges().map(|(e, _)| e).collect();
                        if !edges.is_empty() {
                            let e = edges[i % edges.len()];
                            prop_assert!(g.remove_edge(e).is_some());
                        }
                    }
                    _ => {}
                }
                prop_assert_eq!(g.vertex_count(), vertices.len());
                g.assert_consistent();
            }
        }
    }
}
