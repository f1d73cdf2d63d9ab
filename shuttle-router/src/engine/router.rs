//! The routing engine.
//!
//! Owns the routing graph and the maps from terminal and shuttle identities
//! to graph handles. Path queries run a search, turn the resulting route into
//! a [`Path`], and then board one passenger on every shuttle of that path.
//! A shuttle whose capacity runs out is removed before the query returns, so
//! later queries can no longer use it.

use std::collections::HashMap;

use tracing::debug;

use super::config::EngineConfig;
use super::error::ConfigError;
use crate::domain::{Path, Shuttle, Terminal, TerminalId};
use crate::graph::{EdgeId, RoutingGraph, VertexId};
use crate::search::{Label, Route, min_hop_route, min_time_route};

/// Ordered `(origin, destination)` pair identifying a shuttle.
type ShuttleKey = (TerminalId, TerminalId);

fn shuttle_key(shuttle: &Shuttle) -> ShuttleKey {
    (shuttle.origin().clone(), shuttle.destination().clone())
}

/// Cost of taking a shuttle: the wait at its origin plus its travel time.
///
/// Every terminal on a path except the last is the origin of exactly one
/// shuttle taken, so summing this over the shuttles of a path gives the
/// path's total time. Weighting by travel time alone would let a route
/// through slow terminals win while reporting a larger total.
fn shuttle_cost(graph: &RoutingGraph<Terminal, Shuttle>, edge: EdgeId) -> u64 {
    let travel = graph.edge(edge).map_or(0, |s| u64::from(s.time_mins()));
    let waiting = graph
        .endpoints(edge)
        .and_then(|(origin, _)| graph.vertex(origin))
        .map_or(0, |t| u64::from(t.waiting_mins()));
    travel + waiting
}

/// Shuttle network with capacity-consuming path queries.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    config: EngineConfig,
    graph: RoutingGraph<Terminal, Shuttle>,
    terminals: HashMap<TerminalId, VertexId>,
    shuttles: HashMap<ShuttleKey, EdgeId>,
    next_serial: u64,
}

impl RoutingEngine {
    /// Create an empty engine.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            graph: RoutingGraph::new(),
            terminals: HashMap::new(),
            shuttles: HashMap::new(),
            next_serial: 1,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Capacity every new shuttle starts with.
    pub fn capacity(&self) -> u32 {
        self.config.shuttle_capacity
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn shuttle_count(&self) -> usize {
        self.shuttles.len()
    }

    /// Look up a terminal by id.
    pub fn terminal(&self, id: &TerminalId) -> Option<&Terminal> {
        self.graph.vertex(*self.terminals.get(id)?)
    }

    /// Look up the shuttle from `origin` to `destination`.
    ///
    /// The returned shuttle reports its remaining capacity.
    pub fn shuttle(&self, origin: &TerminalId, destination: &TerminalId) -> Option<&Shuttle> {
        let key = (origin.clone(), destination.clone());
        self.graph.edge(*self.shuttles.get(&key)?)
    }

    /// All terminals in insertion order.
    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> + '_ {
        self.graph.vertices().map(|(_, t)| t)
    }

    /// All shuttles still in service, in insertion order.
    pub fn shuttles(&self) -> impl Iterator<Item = &Shuttle> + '_ {
        self.graph.edges().map(|(_, s)| s)
    }

    /// Add a terminal to the network and return the stored terminal.
    ///
    /// Returns `None` if a terminal with the same id already exists.
    pub fn insert_terminal(&mut self, terminal: Terminal) -> Option<Terminal> {
        if self.terminals.contains_key(terminal.id()) {
            debug!(terminal = %terminal.id(), "rejected duplicate terminal");
            return None;
        }
        let id = terminal.id().clone();
        let vertex = self.graph.insert_vertex(terminal.clone());
        self.terminals.insert(id, vertex);
        Some(terminal)
    }

    /// Add a shuttle from `origin` to `destination` taking `time_mins`.
    ///
    /// The shuttle starts with the configured capacity. Returns `None`
    /// without changing the network if either terminal is unknown, the
    /// ordered pair already has a shuttle, `time_mins` is zero, or origin and
    /// destination are the same terminal.
    pub fn insert_shuttle(
        &mut self,
        origin: &TerminalId,
        destination: &TerminalId,
        time_mins: u32,
    ) -> Option<Shuttle> {
        let origin_vertex = *self.terminals.get(origin)?;
        let destination_vertex = *self.terminals.get(destination)?;

        let shuttle = match Shuttle::new(
            origin.clone(),
            destination.clone(),
            time_mins,
            self.config.shuttle_capacity,
        ) {
            Ok(s) => s.with_serial(self.next_serial),
            Err(e) => {
                debug!(%origin, %destination, error = %e, "rejected shuttle");
                return None;
            }
        };

        let edge = self
            .graph
            .insert_edge(origin_vertex, destination_vertex, shuttle.clone())?;
        self.shuttles.insert(shuttle_key(&shuttle), edge);
        self.next_serial += 1;
        Some(shuttle)
    }

    /// Remove a terminal and every shuttle to or from it.
    ///
    /// Returns false if the terminal is unknown.
    pub fn remove_terminal(&mut self, id: &TerminalId) -> bool {
        let Some(vertex) = self.terminals.remove(id) else {
            return false;
        };

        let incident: Vec<ShuttleKey> = self
            .graph
            .outgoing_edges(vertex)
            .chain(self.graph.incoming_edges(vertex))
            .filter_map(|e| self.graph.edge(e).map(shuttle_key))
            .collect();
        for key in &incident {
            self.shuttles.remove(key);
        }

        self.graph.remove_vertex(vertex);
        debug!(terminal = %id, shuttles = incident.len(), "removed terminal");
        true
    }

    /// Remove a shuttle.
    ///
    /// Returns false if the shuttle is no longer in the network, even when
    /// a newer shuttle now runs between the same terminals.
    pub fn remove_shuttle(&mut self, shuttle: &Shuttle) -> bool {
        let Some(edge) = self.resolve(shuttle) else {
            return false;
        };
        self.shuttles.remove(&shuttle_key(shuttle));
        self.graph.remove_edge(edge);
        true
    }

    /// Shuttles leaving `terminal`, in no particular order.
    ///
    /// Returns `None` if the terminal is unknown.
    pub fn outgoing_shuttles(&self, terminal: &TerminalId) -> Option<Vec<Shuttle>> {
        let vertex = *self.terminals.get(terminal)?;
        Some(
            self.graph
                .outgoing_edges(vertex)
                .filter_map(|e| self.graph.edge(e).cloned())
                .collect(),
        )
    }

    /// Shuttles arriving at `terminal`, in no particular order.
    ///
    /// Returns `None` if the terminal is unknown.
    pub fn incoming_shuttles(&self, terminal: &TerminalId) -> Option<Vec<Shuttle>> {
        let vertex = *self.terminals.get(terminal)?;
        Some(
            self.graph
                .incoming_edges(vertex)
                .filter_map(|e| self.graph.edge(e).cloned())
                .collect(),
        )
    }

    /// The terminal at the other end of `shuttle` from `terminal`.
    ///
    /// Returns `None` if either is unknown or `terminal` is not an endpoint
    /// of `shuttle`.
    pub fn opposite(&self, shuttle: &Shuttle, terminal: &TerminalId) -> Option<Terminal> {
        let vertex = *self.terminals.get(terminal)?;
        let edge = self.resolve(shuttle)?;
        let other = self.graph.opposite(vertex, edge)?;
        self.graph.vertex(other).cloned()
    }

    /// Route one passenger with the fewest stops, ties broken by time.
    ///
    /// A direct shuttle from origin to destination, when one exists, is
    /// always the answer. Boards the passenger on every shuttle of the
    /// returned path. Returns `None` (and changes nothing) if either
    /// terminal is unknown or the destination is unreachable.
    pub fn find_shortest_path(
        &mut self,
        origin: &TerminalId,
        destination: &TerminalId,
    ) -> Option<Path> {
        let (source, target) = self.endpoints(origin, destination)?;
        let graph = &self.graph;
        let route = min_hop_route(graph, source, target, |e| shuttle_cost(graph, e))?;
        let route = self.prefer_direct(route);
        Some(self.realize(route))
    }

    /// Route one passenger in the least total time, ties broken by fewer
    /// stops.
    ///
    /// Boards the passenger on every shuttle of the returned path. Returns
    /// `None` (and changes nothing) if either terminal is unknown or the
    /// destination is unreachable.
    pub fn find_fastest_path(
        &mut self,
        origin: &TerminalId,
        destination: &TerminalId,
    ) -> Option<Path> {
        let (source, target) = self.endpoints(origin, destination)?;
        let graph = &self.graph;
        let route = min_time_route(graph, source, target, |e| shuttle_cost(graph, e))?;
        Some(self.realize(route))
    }

    fn endpoints(
        &self,
        origin: &TerminalId,
        destination: &TerminalId,
    ) -> Option<(VertexId, VertexId)> {
        Some((
            *self.terminals.get(origin)?,
            *self.terminals.get(destination)?,
        ))
    }

    /// Edge holding this exact shuttle, not merely one on the same pair.
    fn resolve(&self, shuttle: &Shuttle) -> Option<EdgeId> {
        let edge = *self.shuttles.get(&shuttle_key(shuttle))?;
        let stored = self.graph.edge(edge)?;
        (stored.serial() == shuttle.serial()).then_some(edge)
    }

    /// Replace `route` with the direct shuttle between its ends, if any.
    fn prefer_direct(&self, route: Route) -> Route {
        let (source, target) = (route.source(), route.destination());
        match self.graph.get_edge(source, target) {
            Some(direct) if route.edges != [direct] => Route {
                vertices: vec![source, target],
                edges: vec![direct],
                label: Label::default().extend(shuttle_cost(&self.graph, direct)),
            },
            _ => route,
        }
    }

    /// Build the path for `route` and board a passenger along it.
    fn realize(&mut self, route: Route) -> Path {
        let terminals: Vec<Terminal> = route
            .vertices
            .iter()
            .map(|v| {
                self.graph
                    .vertex(*v)
                    .cloned()
                    .expect("route vertex must be live")
            })
            .collect();
        let shuttle_mins: Vec<u32> = route
            .edges
            .iter()
            .map(|e| {
                self.graph
                    .edge(*e)
                    .map(Shuttle::time_mins)
                    .expect("route edge must be live")
            })
            .collect();

        let path = Path::from_stops(terminals, &shuttle_mins);
        debug_assert_eq!(path.time_mins(), route.label.time);

        let mut evicted = Vec::new();
        for edge in &route.edges {
            let Some(shuttle) = self.graph.edge_mut(*edge) else {
                continue;
            };
            if shuttle.board() == 0 {
                let key = shuttle_key(shuttle);
                self.shuttles.remove(&key);
                self.graph.remove_edge(*edge);
                evicted.push(key);
            }
        }

        debug!(
            origin = %path.origin().id(),
            destination = %path.destination().id(),
            hops = path.hops(),
            time = path.time_mins(),
            evicted = evicted.len(),
            "routed passenger"
        );
        for (origin, destination) in &evicted {
            debug!(%origin, %destination, "shuttle reached capacity, removed");
        }

        path
    }
}

#[cfg(test)]
impl RoutingEngine {
    /// Panics unless the identity maps and the graph agree.
    pub(crate) fn assert_consistent(&self) {
        self.graph.assert_consistent();
        assert_eq!(self.graph.vertex_count(), self.terminals.len());
        assert_eq!(self.graph.edge_count(), self.shuttles.len());
        for (id, vertex) in &self.terminals {
            assert_eq!(self.graph.vertex(*vertex).map(Terminal::id), Some(id));
        }
        for (key, edge) in &self.shuttles {
            assert_eq!(self.graph.edge(*edge).map(shuttle_key).as_ref(), Some(key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TerminalId {
        TerminalId::new(s).unwrap()
    }

    fn engine() -> RoutingEngine {
        RoutingEngine::new(EngineConfig::new(2)).unwrap()
    }

    fn with_terminals(names: &[(&str, u32)]) -> RoutingEngine {
        let mut e = engine();
        for (name, wait) in names {
            e.insert_terminal(Terminal::parse(name, *wait).unwrap()).unwrap();
        }
        e
    }

    #[test]
    fn zero_capacity_engine_rejected() {
        assert!(RoutingEngine::new(EngineConfig::new(0)).is_err());
    }

    #[test]
    fn insert_terminal_returns_stored() {
        let mut e = engine();
        let t = Terminal::parse("A", 1).unwrap();
        assert_eq!(e.insert_terminal(t.clone()), Some(t.clone()));
        assert_eq!(e.terminal(&id("A")), Some(&t));
        assert_eq!(e.terminal_count(), 1);
    }

    #[test]
    fn duplicate_terminal_rejected() {
        let mut e = with_terminals(&[("A", 1)]);
        assert!(e.insert_terminal(Terminal::parse("A", 9).unwrap()).is_none());
        assert_eq!(e.terminal(&id("A")).unwrap().waiting_mins(), 1);
        assert_eq!(e.terminal_count(), 1);
    }

    #[test]
    fn insert_shuttle_uses_configured_capacity() {
        let mut e = with_terminals(&[("A", 1), ("B", 2)]);
        let s = e.insert_shuttle(&id("A"), &id("B"), 4).unwrap();
        assert_eq!(s.capacity(), 2);
        assert_eq!(e.shuttle(&id("A"), &id("B")), Some(&s));
        assert_eq!(e.shuttle_count(), 1);
    }

    #[test]
    fn malformed_shuttles_rejected() {
        let mut e = with_terminals(&[("A", 1), ("B", 2)]);
        assert!(e.insert_shuttle(&id("A"), &id("X"), 4).is_none());
        assert!(e.insert_shuttle(&id("X"), &id("A"), 4).is_none());
        assert!(e.insert_shuttle(&id("A"), &id("B"), 0).is_none());
        assert!(e.insert_shuttle(&id("A"), &id("A"), 3).is_none());
        assert_eq!(e.shuttle_count(), 0);
        e.assert_consistent();
    }

    #[test]
    fn duplicate_shuttle_rejected() {
        let mut e = with_terminals(&[("A", 1), ("B", 2)]);
        e.insert_shuttle(&id("A"), &id("B"), 4).unwrap();
        assert!(e.insert_shuttle(&id("A"), &id("B"), 7).is_none());
        assert_eq!(e.shuttle(&id("A"), &id("B")).unwrap().time_mins(), 4);

        // The reverse direction is a different shuttle
        assert!(e.insert_shuttle(&id("B"), &id("A"), 7).is_some());
        assert_eq!(e.shuttle_count(), 2);
    }

    #[test]
    fn remove_unknown_is_false() {
        let mut e = with_terminals(&[("A", 1), ("B", 2)]);
        assert!(!e.remove_terminal(&id("X")));

        let s = e.insert_shuttle(&id("A"), &id("B"), 4).unwrap();
        assert!(e.remove_shuttle(&s));
        assert!(!e.remove_shuttle(&s));
        assert!(e.outgoing_shuttles(&id("A")).unwrap().is_empty());
    }

    #[test]
    fn remove_terminal_drops_shuttle_mappings() {
        let mut e = with_terminals(&[("A", 1), ("B", 2), ("C", 3)]);
        e.insert_shuttle(&id("A"), &id("B"), 1).unwrap();
        e.insert_shuttle(&id("B"), &id("C"), 1).unwrap();
        e.insert_shuttle(&id("C"), &id("A"), 1).unwrap();

        assert!(e.remove_terminal(&id("B")));
        assert_eq!(e.terminal_count(), 2);
        assert_eq!(e.shuttle_count(), 1);
        assert!(e.shuttle(&id("A"), &id("B")).is_none());
        assert!(e.shuttle(&id("B"), &id("C")).is_none());
        assert!(e.outgoing_shuttles(&id("B")).is_none());

        // Pair is free again once B is re-added
        e.insert_terminal(Terminal::parse("B", 2).unwrap()).unwrap();
        assert!(e.insert_shuttle(&id("A"), &id("B"), 5).is_some());
        e.assert_consistent();
    }

    #[test]
    fn incoming_shuttles() {
        let mut e = with_terminals(&[("A", 1), ("B", 2), ("C", 3)]);
        e.insert_shuttle(&id("A"), &id("C"), 1).unwrap();
        e.insert_shuttle(&id("B"), &id("C"), 2).unwrap();

        let mut origins: Vec<String> = e
            .incoming_shuttles(&id("C"))
            .unwrap()
            .iter()
            .map(|s| s.origin().to_string())
            .collect();
        origins.sort();
        assert_eq!(origins, vec!["A", "B"]);
        assert!(e.incoming_shuttles(&id("X")).is_none());
    }

    #[test]
    fn opposite_requires_incidence() {
        let mut e = with_terminals(&[("A", 1), ("B", 2), ("C", 3)]);
        let ab = e.insert_shuttle(&id("A"), &id("B"), 1).unwrap();

        assert_eq!(e.opposite(&ab, &id("A")).unwrap().id(), &id("B"));
        assert_eq!(e.opposite(&ab, &id("B")).unwrap().id(), &id("A"));
        assert!(e.opposite(&ab, &id("C")).is_none());
        assert!(e.opposite(&ab, &id("X")).is_none());

        e.remove_shuttle(&ab);
        assert!(e.opposite(&ab, &id("A")).is_none());
    }

    #[test]
    fn shuttle_cost_includes_origin_wait() {
        let mut e = with_terminals(&[("A", 4), ("B", 9)]);
        e.insert_shuttle(&id("A"), &id("B"), 6).unwrap();
        let edge = e.shuttles[&(id("A"), id("B"))];
        assert_eq!(shuttle_cost(&e.graph, edge), 10);
    }

    #[test]
    fn same_origin_and_destination() {
        let mut e = with_terminals(&[("A", 4), ("B", 9)]);
        e.insert_shuttle(&id("A"), &id("B"), 6).unwrap();

        let path = e.find_fastest_path(&id("A"), &id("A")).unwrap();
        assert_eq!(path.stops(), vec![&id("A")]);
        assert_eq!(path.time_mins(), 0);

        let path = e.find_shortest_path(&id("A"), &id("A")).unwrap();
        assert_eq!(path.hops(), 0);
        assert_eq!(e.shuttle(&id("A"), &id("B")).unwrap().capacity(), 2);
    }

    #[test]
    fn unknown_endpoints_give_no_path() {
        let mut e = with_terminals(&[("A", 4)]);
        assert!(e.find_fastest_path(&id("A"), &id("X")).is_none());
        assert!(e.find_shortest_path(&id("X"), &id("A")).is_none());
    }
}
