//! Engine error types.

use crate::domain::{DomainError, TerminalId};

/// Errors from loading or validating an [`EngineConfig`](super::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Shuttles must carry at least one passenger
    #[error("shuttle capacity must be positive")]
    ZeroCapacity,

    /// Config file could not be read
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    /// Config JSON is malformed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from building an engine out of a network description.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Engine configuration is invalid
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A terminal or shuttle record failed validation
    #[error("invalid record: {0}")]
    Invalid(#[from] DomainError),

    /// Two terminals share an id
    #[error("duplicate terminal {0}")]
    DuplicateTerminal(TerminalId),

    /// A shuttle references a terminal that was never declared
    #[error("unknown terminal {0}")]
    UnknownTerminal(TerminalId),

    /// Two shuttles share an ordered origin/destination pair
    #[error("duplicate shuttle {origin} -> {destination}")]
    DuplicateShuttle {
        origin: TerminalId,
        destination: TerminalId,
    },

    /// Network JSON is malformed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
