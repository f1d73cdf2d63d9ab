//! Minimum-time search with a fewest-hop tie-break.
//!
//! Dijkstra's algorithm over an [`IndexedMinHeap`] keyed by [`Label`]. Since
//! labels compare by time and then by hop count, a single comparison both
//! relaxes strictly faster routes and prefers fewer transfers between routes
//! of equal time. Queued vertices have their key lowered in place rather than
//! being pushed a second time.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::tree::{Label, Route, SearchTree};
use crate::collections::{EntryHandle, IndexedMinHeap};
use crate::graph::{EdgeId, RoutingGraph, VertexId};

/// Label every vertex reachable from `source` with its minimum-time route.
///
/// Returns an empty tree if `source` is not a live vertex.
pub fn min_time_tree<V, E, W>(graph: &RoutingGraph<V, E>, source: VertexId, weight: W) -> SearchTree
where
    W: Fn(EdgeId) -> u64,
{
    dijkstra(graph, source, None, weight)
}

/// Minimum-time route from `source` to `destination`, fewest hops on ties.
///
/// Stops as soon as `destination` is settled. Returns `None` if the
/// destination is unreachable.
pub fn min_time_route<V, E, W>(
    graph: &RoutingGraph<V, E>,
    source: VertexId,
    destination: VertexId,
    weight: W,
) -> Option<Route>
where
    W: Fn(EdgeId) -> u64,
{
    dijkstra(graph, source, Some(destination), weight).route_to(destination)
}

fn dijkstra<V, E, W>(
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

    let mut queue: IndexedMinHeap<Label, VertexId> = IndexedMinHeap::new();
    let mut queued: HashMap<VertexId, EntryHandle> = HashMap::new();
    let mut settled: HashSet<VertexId> = HashSet::new();

    tree.reach(source, Label::default(), None);
    queued.insert(source, queue.insert(Label::default(), source));

    while let Some((label, u)) = queue.remove_min() {
        queued.remove(&u);
        settled.insert(u);

        trace!(vertex = ?u, hops = label.hops, time = label.time, "settled vertex");

        if Some(u) == target {
            break;
        }

        for edge in graph.outgoing_edges(u) {
            let Some(v) = graph.opposite(u, edge) else {
                continue;
            };
            if settled.contains(&v) {
                continue;
            }

            let candidate = label.extend(weight(edge));
            if tree.label(v).is_some_and(|best| candidate >= best) {
                continue;
            }

            tree.reach(v, candidate, Some((u, edge)));
            match queued.get(&v) {
                Some(handle) => {
                    queue.replace_key(*handle, candidate);
                }
                None => {
                    queued.insert(v, queue.insert(candidate, v));
                }
            }
        }
    }

    debug!(
        reached = tree.len(),
        settled = settled.len(),
        "minimum-time search complete"
    );

    tree
}
