//! Terminal identity and terminal records.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// A terminal identifier.
///
/// Identifiers are opaque strings. The only validation is that they must be
/// non-empty; uniqueness is enforced by the engine that stores them.
///
/// # Examples
///
/// ```
/// use shuttle_router::domain::TerminalId;
///
/// let id = TerminalId::new("A").unwrap();
/// assert_eq!(id.as_str(), "A");
///
/// // Empty strings are rejected
/// assert!(TerminalId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TerminalId(String);

impl TerminalId {
    /// Create a new terminal identifier.
    ///
    /// Returns an error if the string is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if s.is_empty() {
            return Err(DomainError::EmptyTerminalId);
        }
        Ok(TerminalId(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TerminalId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TerminalId::new(s)
    }
}

impl From<TerminalId> for String {
    fn from(id: TerminalId) -> Self {
        id.0
    }
}

impl fmt::Debug for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalId({})", self.0)
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop in the shuttle network.
///
/// Passengers spend `waiting_mins` at a terminal whenever they leave it on a
/// shuttle, so the waiting time counts for every stop on a path except the
/// final destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terminal {
    id: TerminalId,
    waiting_mins: u32,
}

impl Terminal {
    /// Create a terminal from an already-validated identifier.
    pub fn new(id: TerminalId, waiting_mins: u32) -> Self {
        Self { id, waiting_mins }
    }

    /// Create a terminal, validating the identifier.
    pub fn parse(id: &str, waiting_mins: u32) -> Result<Self, DomainError> {
        Ok(Self::new(TerminalId::new(id)?, waiting_mins))
    }

    pub fn id(&self) -> &TerminalId {
        &self.id
    }

    /// Waiting time in minutes.
    pub fn waiting_mins(&self) -> u32 {
        self.waiting_mins
    }

    /// Returns the waiting time as a Duration.
    pub fn waiting_time(&self) -> Duration {
        Duration::minutes(i64::from(self.waiting_mins))
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (wait {}m)", self.id, self.waiting_mins)
    }
}
