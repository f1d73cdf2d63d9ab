//! Minimum-hop breadth-first search.
//!
//! Vertices are expanded in level order, so the first time a vertex is
//! reached it is at its minimum hop count. Every vertex is queued once.
//! Before a vertex is expanded, a second route at the same hop count with a
//! smaller accumulated weight may still replace its parent; all vertices of
//! one level are discovered before any of them is expanded, so the label a
//! vertex is expanded with is final.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::tree::{Route, SearchTree};
use crate::graph::{EdgeId, RoutingGraph, VertexId};

/// Label every vertex reachable from `source` with its fewest-hop route.
///
/// Returns an empty tree if `source` is not a live vertex.
pub fn min_hop_tree<V, E, W>(graph: &RoutingGraph<V, E>, source: VertexId, weight: W) -> SearchTree
where
    W: Fn(EdgeId) -> u64,
{
    breadth_first(graph, source, None, weight)
}

/// Fewest-hop route from `source` to `destination`.
///
/// Stops exploring once `destination` is dequeued. Returns `None` if the
/// destination is unreachable.
pub fn min_hop_route<V, E, W>(
    graph: &RoutingGraph<V, E>,
    source: VertexId,
    destination: VertexId,
    weight: W,
) -> Option<Route>
where
    W: Fn(EdgeId) -> u64,
{
    breadth_first(graph, source, Some(destination), weight).route_to(destination)
}

fn breadth_first<V, E, W>(
    graph: &RoutingGraph<V, E>,
    source: VertexId,
    target: Option<VertexId>,
    weight: W,
) -> SearchTree
where
    W: Fn(EdgeId) -> u64,
{
    let mut tree = SearchTree::new(source);
    if !graph.contains_vertex(source) {
        return tree;
    }

    tree.reach(source, Default::default(), None);
    let mut queue = VecDeque::from([source]);
    let mut expanded = 0usize;

    while let Some(u) = queue.pop_front() {
        if Some(u) == target {
            break;
        }
        let Some(label) = tree.label(u) else {
            continue;
        };
        expanded += 1;

        trace!(vertex = ?u, hops = label.hops, time = label.time, "BFS expanding vertex");

        for edge in graph.outgoing_edges(u) {
            let Some(v) = graph.opposite(u, edge) else {
                continue;
            };
            let candidate = label.extend(weight(edge));

            match tree.label(v) {
                None => {
                    tree.reach(v, candidate, Some((u, edge)));
                    queue.push_back(v);
                }
                // Same level, cheaper: swap parent before v is expanded
                Some(best) if best.hops == candidate.hops && candidate.time < best.time => {
                    tree.reach(v, candidate, Some((u, edge)));
                }
                Some(_) => {}
            }
        }
    }

    debug!(
        reached = tree.len(),
        expanded, "minimum-hop search complete"
    );

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Label;

    /// Graph whose edge element is its weight.
    fn graph(
        names: &[&'static str],
        edges: &[(usize, usize, u64)],
    ) -> (RoutingGraph<&'static str, u64>, Vec<VertexId>) {
        let mut g = RoutingGraph::new();
        let vs: Vec<VertexId> = names.iter().map(|n| g.insert_vertex(*n)).collect();
        for (u, v, w) in edges {
            g.insert_edge(vs[*u], vs[*v], *w).unwrap();
        }
        (g, vs)
    }

    fn weight<'a>(g: &'a RoutingGraph<&'static str, u64>) -> impl Fn(EdgeId) -> u64 + 'a {
        move |e| g.edge(e).copied().unwrap_or(0)
    }

    #[test]
    fn fewest_hops_beats_lighter_longer_route() {
        // A -> D direct costs 18, A -> B -> C -> D costs 3
        let (g, vs) = graph(
            &["A", "B", "C", "D"],
            &[(0, 3, 18), (0, 1, 1), (1, 2, 1), (2, 3, 1)],
        );
        let route = min_hop_route(&g, vs[0], vs[3], weight(&g)).unwrap();
        assert_eq!(route.vertices, vec![vs[0], vs[3]]);
        assert_eq!(route.label, Label { time: 18, hops: 1 });
    }

    #[test]
    fn equal_hops_break_ties_by_time() {
        // Two 2-hop routes to D: via B (2 + 8) and via C (5 + 15)
        let (g, vs) = graph(
            &["A", "B", "C", "D"],
            &[(0, 2, 5), (2, 3, 15), (0, 1, 2), (1, 3, 8)],
        );
        let route = min_hop_route(&g, vs[0], vs[3], weight(&g)).unwrap();
        assert_eq!(route.vertices, vec![vs[0], vs[1], vs[3]]);
        assert_eq!(route.label, Label { time: 10, hops: 2 });
    }

    #[test]
    fn tree_labels_every_reachable_vertex() {
        let (g, vs) = graph(
            &["A", "B", "C", "D", "E"],
            &[(0, 1, 2), (1, 2, 3), (2, 3, 4), (4, 0, 1)],
        );
        let tree = min_hop_tree(&g, vs[0], weight(&g));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.label(vs[0]), Some(Label::default()));
        assert_eq!(tree.label(vs[2]), Some(Label { time: 5, hops: 2 }));
        assert_eq!(tree.label(vs[3]), Some(Label { time: 9, hops: 3 }));
        // E only has an edge into A
        assert_eq!(tree.label(vs[4]), None);
    }

    #[test]
    fn source_without_outgoing_edges() {
        let (g, vs) = graph(&["A", "B"], &[(1, 0, 4)]);
        let tree = min_hop_tree(&g, vs[0], weight(&g));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.route_to(vs[0]), Some(Route::trivial(vs[0])));
        assert!(min_hop_route(&g, vs[0], vs[1], weight(&g)).is_none());
    }

    #[test]
    fn cycles_do_not_revisit() {
        let (g, vs) = graph(&["A", "B", "C"], &[(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 0, 1)]);
        let tree = min_hop_tree(&g, vs[0], weight(&g));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.label(vs[0]), Some(Label::default()));
    }

    #[test]
    fn dead_source_yields_empty_tree() {
        let (mut g, vs) = graph(&["A", "B"], &[(0, 1, 1)]);
        g.remove_vertex(vs[0]);
        assert!(min_hop_tree(&g, vs[0], weight(&g)).is_empty());
        assert!(min_hop_route(&g, vs[0], vs[1], weight(&g)).is_none());
    }
}
