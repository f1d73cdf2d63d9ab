//! Domain types for the shuttle network.
//!
//! Terminals, shuttles and path results. Records validate their fields at
//! construction time, so the routing engine only ever stores well-formed
//! values.

mod error;
mod path;
mod shuttle;
mod terminal;

pub use error::DomainError;
pub use path::Path;
pub use shuttle::Shuttle;
pub use terminal::{Terminal, TerminalId};
