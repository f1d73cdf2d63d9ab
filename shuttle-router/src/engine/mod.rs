//! Routing engine over a capacity-limited shuttle network.
//!
//! This module ties the pieces together: terminals and shuttles are stored
//! in a [`RoutingGraph`](crate::graph::RoutingGraph), path queries run the
//! searches from [`crate::search`], and every successful query consumes one
//! seat on each shuttle it uses.

mod config;
mod error;
mod router;


pub use config::EngineConfig;
pub use error::{ConfigError, NetworkError};
pub use router::RoutingEngine;
