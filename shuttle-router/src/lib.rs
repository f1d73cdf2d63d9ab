//! Shuttle routing engine.
//!
//! Models terminals joined by capacity-limited one-way shuttles and answers
//! two questions: "how do I get there with the fewest stops?" and "how do I
//! get there fastest?". Every answer boards a passenger, and shuttles that
//! fill up are withdrawn from the network.
//!
//! # Example
//!
//! ```
//! use shuttle_router::domain::{Terminal, TerminalId};
//! use shuttle_router::engine::{EngineConfig, RoutingEngine};
//!
//! let mut engine = RoutingEngine::new(EngineConfig::new(3)).unwrap();
//! for (id, wait) in [("A", 1), ("B", 3), ("D", 2)] {
//!     engine.insert_terminal(Terminal::parse(id, wait).unwrap());
//! }
//! let (a, b, d) = (
//!     TerminalId::new("A").unwrap(),
//!     TerminalId::new("B").unwrap(),
//!     TerminalId::new("D").unwrap(),
//! );
//! engine.insert_shuttle(&a, &b, 2);
//! engine.insert_shuttle(&b, &d, 8);
//! engine.insert_shuttle(&a, &d, 18);
//!
//! let fastest = engine.find_fastest_path(&a, &d).unwrap();
//! assert_eq!(fastest.time_mins(), 14);
//!
//! let shortest = engine.find_shortest_path(&a, &d).unwrap();
//! assert_eq!(shortest.hops(), 1);
//! assert_eq!(shortest.time_mins(), 19);
//! ```

pub mod collections;
pub mod domain;
pub mod engine;
pub mod graph;
pub mod network;
pub mod search;
