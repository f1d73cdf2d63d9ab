//! Domain error types.
//!
//! These errors represent validation failures when constructing terminals
//! and shuttles. They are distinct from configuration errors.

/// Domain-level errors for record validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Terminal identifier is empty
    #[error("terminal id cannot be empty")]
    EmptyTerminalId,

    /// Shuttle travel time must be positive
    #[error("shuttle travel time must be positive")]
    ZeroTravelTime,

    /// Shuttle connects a terminal to itself
    #[error("shuttle cannot connect terminal {0} to itself")]
    SelfLoop(String),
}
