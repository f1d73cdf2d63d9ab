//! Shuttle routes between terminals.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{DomainError, TerminalId};

/// A one-directional timed connection between two terminals.
///
/// A shuttle from A to B says nothing about travel from B to A. Each shuttle
/// carries a remaining passenger capacity; the engine decrements it whenever
/// a path query routes a passenger across the shuttle and removes the shuttle
/// once it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shuttle {
    origin: TerminalId,
    destination: TerminalId,
    time_mins: u32,
    capacity: u32,
    #[serde(skip)]
    serial: u64,
}

impl Shuttle {
    /// Create a shuttle, validating the travel time and endpoints.
    pub fn new(
        origin: TerminalId,
        destination: TerminalId,
        time_mins: u32,
        capacity: u32,
    ) -> Result<Self, DomainError> {
        if time_mins == 0 {
            return Err(DomainError::ZeroTravelTime);
        }
        if origin == destination {
            return Err(DomainError::SelfLoop(origin.as_str().to_string()));
        }
        Ok(Self {
            origin,
            destination,
            time_mins,
            capacity,
            serial: 0,
        })
    }

    pub fn origin(&self) -> &TerminalId {
        &self.origin
    }

    pub fn destination(&self) -> &TerminalId {
        &self.destination
    }

    /// Travel time in minutes.
    pub fn time_mins(&self) -> u32 {
        self.time_mins
    }

    /// Returns the travel time as a Duration.
    pub fn travel_time(&self) -> Duration {
        Duration::minutes(i64::from(self.time_mins))
    }

    /// Remaining passenger-trips before the shuttle is withdrawn.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Serial number assigned when the shuttle joins an engine.
    ///
    /// Zero for shuttles that were never inserted. A later shuttle on the
    /// same pair gets a new serial, so an old value cannot reach it.
    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn with_serial(mut self, serial: u64) -> Self {
        self.serial = serial;
        self
    }

    /// Route one passenger across the shuttle, returning the remaining capacity.
    pub(crate) fn board(&mut self) -> u32 {
        self.capacity = self.capacity.saturating_sub(1);
        self.capacity
    }
}

impl fmt::Display for Shuttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}m, {} seats left)",
            self.origin, self.destination, self.time_mins, self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TerminalId {
        TerminalId::new(s).unwrap()
    }

    #[test]
    fn new_valid_shuttle() {
        let shuttle = Shuttle::new(id("A"), id("B"), 2, 3).unwrap();
        assert_eq!(shuttle.origin(), &id("A"));
        assert_eq!(shuttle.destination(), &id("B"));
        assert_eq!(shuttle.time_mins(), 2);
        assert_eq!(shuttle.travel_time(), Duration::minutes(2));
        assert_eq!(shuttle.capacity(), 3);
    }

    #[test]
    fn reject_zero_time() {
        assert_eq!(
            Shuttle::new(id("A"), id("B"), 0, 3),
            Err(DomainError::ZeroTravelTime)
        );
    }

    #[test]
    fn reject_self_loop() {
        assert_eq!(
            Shuttle::new(id("A"), id("A"), 5, 3),
            Err(DomainError::SelfLoop("A".into()))
        );
    }

    #[test]
    fn serial_distinguishes_same_pair() {
        let first = Shuttle::new(id("A"), id("B"), 2, 3).unwrap().with_serial(1);
        let second = Shuttle::new(id("A"), id("B"), 2, 3).unwrap().with_serial(2);
        assert_eq!(first.serial(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn board_counts_down_to_zero() {
        let mut shuttle = Shuttle::new(id("A"), id("B"), 2, 2).unwrap();
        assert_eq!(shuttle.board(), 1);
        assert_eq!(shuttle.board(), 0);
        assert_eq!(shuttle.board(), 0);
    }

    #[test]
    fn display() {
        let shuttle = Shuttle::new(id("A"), id("D"), 18, 3).unwrap();
        assert_eq!(shuttle.to_string(), "A -> D (18m, 3 seats left)");
    }
}
