//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default passenger-trips per shuttle before it is withdrawn.
const DEFAULT_SHUTTLE_CAPACITY: u32 = 3;

/// Configuration parameters for a routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity every new shuttle starts with.
    /// A shuttle is removed from the network once this many passengers
    /// have been routed across it.
    pub shuttle_capacity: u32,
}

impl EngineConfig {
    /// Create a new configuration with the given shuttle capacity.
    pub fn new(shuttle_capacity: u32) -> Self {
        Self { shuttle_capacity }
    }

    /// Check that the configuration can drive an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shuttle_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shuttle_capacity: DEFAULT_SHUTTLE_CAPACITY,
        }
    }
}
