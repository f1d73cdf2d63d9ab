//! Declarative network descriptions.
//!
//! A [`NetworkDescription`] lists terminals and shuttles and builds a fully
//! populated [`RoutingEngine`] in one step. Descriptions can be parsed from
//! JSON or assembled with the fluent [`NetworkBuilder`].
//!
//! Unlike the engine's insert operations, which answer `None` for rejected
//! records, building a description reports the first offending record.

use serde::{Deserialize, Serialize};

use crate::domain::{Shuttle, Terminal, TerminalId};
use crate::engine::{EngineConfig, NetworkError, RoutingEngine};

/// A shuttle to be created between two declared terminals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuttleEntry {
    pub origin: TerminalId,
    pub destination: TerminalId,
    pub time_mins: u32,
}

/// Terminals and shuttles making up a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(default)]
    pub terminals: Vec<Terminal>,
    #[serde(default)]
    pub shuttles: Vec<ShuttleEntry>,
}

impl NetworkDescription {
    /// Parse a description from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use shuttle_router::engine::EngineConfig;
    /// use shuttle_router::network::NetworkDescription;
    ///
    /// let json = r#"{
    ///     "terminals": [
    ///         {"id": "A", "waiting_mins": 1},
    ///         {"id": "B", "waiting_mins": 3}
    ///     ],
    ///     "shuttles": [{"origin": "A", "destination": "B", "time_mins": 2}]
    /// }"#;
    ///
    /// let engine = NetworkDescription::from_json_str(json)
    ///     .unwrap()
    ///     .build(EngineConfig::default())
    ///     .unwrap();
    /// assert_eq!(engine.terminal_count(), 2);
    /// assert_eq!(engine.shuttle_count(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an engine holding every terminal and shuttle.
    ///
    /// Fails on the first duplicate terminal, shuttle naming an undeclared
    /// terminal, invalid shuttle, or duplicate ordered shuttle pair.
    pub fn build(&self, config: EngineConfig) -> Result<RoutingEngine, NetworkError> {
        let mut engine = RoutingEngine::new(config)?;

        for terminal in &self.terminals {
            if engine.insert_terminal(terminal.clone()).is_none() {
                return Err(NetworkError::DuplicateTerminal(terminal.id().clone()));
            }
        }

        for entry in &self.shuttles {
            for end in [&entry.origin, &entry.destination] {
                if engine.terminal(end).is_none() {
                    return Err(NetworkError::UnknownTerminal(end.clone()));
                }
            }

            // Surface the validation reason the engine would swallow
            Shuttle::new(
                entry.origin.clone(),
                entry.destination.clone(),
                entry.time_mins,
                engine.capacity(),
            )?;

            if engine
                .insert_shuttle(&entry.origin, &entry.destination, entry.time_mins)
                .is_none()
            {
                return Err(NetworkError::DuplicateShuttle {
                    origin: entry.origin.clone(),
                    destination: entry.destination.clone(),
                });
            }
        }

        Ok(engine)
    }
}

impl RoutingEngine {
    /// Build an engine from a network description.
    pub fn from_description(
        config: EngineConfig,
        description: &NetworkDescription,
    ) -> Result<Self, NetworkError> {
        description.build(config)
    }
}

/// Builder for network descriptions.
///
/// Identifiers are validated when the description is built.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    terminals: Vec<(String, u32)>,
    shuttles: Vec<(String, String, u32)>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a terminal.
    pub fn terminal(mut self, id: &str, waiting_mins: u32) -> Self {
        self.terminals.push((id.to_string(), waiting_mins));
        self
    }

    /// Add a shuttle.
    pub fn shuttle(mut self, origin: &str, destination: &str, time_mins: u32) -> Self {
        self.shuttles
            .push((origin.to_string(), destination.to_string(), time_mins));
        self
    }

    /// Validate identifiers and produce the description.
    pub fn describe(self) -> Result<NetworkDescription, NetworkError> {
        let terminals = self
            .terminals
            .into_iter()
            .map(|(id, wait)| Terminal::parse(&id, wait))
            .collect::<Result<Vec<_>, _>>()?;

        let shuttles = self
            .shuttles
            .into_iter()
            .map(|(origin, destination, time_mins)| {
                Ok(ShuttleEntry {
                    origin: TerminalId::new(origin)?,
                    destination: TerminalId::new(destination)?,
                    time_mins,
                })
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;

        Ok(NetworkDescription {
            terminals,
            shuttles,
        })
    }

    /// Build an engine directly.
    pub fn build(self, config: EngineConfig) -> Result<RoutingEngine, NetworkError> {
        self.describe()?.build(config)
    }
}
