//! Path query results.
//!
//! A `Path` is the answer to a routing query: the ordered terminals a
//! passenger passes through plus the total elapsed time.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Terminal, TerminalId};

/// An ordered route from origin to destination with its total time.
///
/// The total time is the sum of the waiting times of every terminal except
/// the final destination plus the travel times of every shuttle taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    terminals: Vec<Terminal>,
    time_mins: u64,
}

impl Path {
    /// Assemble a path from its stops and the travel time of each shuttle
    /// between consecutive stops.
    ///
    /// `shuttle_mins` must hold exactly one entry per hop.
    pub(crate) fn from_stops(terminals: Vec<Terminal>, shuttle_mins: &[u32]) -> Self {
        debug_assert!(!terminals.is_empty());
        debug_assert_eq!(terminals.len(), shuttle_mins.len() + 1);

        let waiting: u64 = terminals
            .iter()
            .take(terminals.len().saturating_sub(1))
            .map(|t| u64::from(t.waiting_mins()))
            .sum();
        let travel: u64 = shuttle_mins.iter().map(|m| u64::from(*m)).sum();

        Self {
            terminals,
            time_mins: waiting + travel,
        }
    }

    /// Terminals in travel order, origin and destination inclusive.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Terminal identifiers in travel order.
    pub fn stops(&self) -> Vec<&TerminalId> {
        self.terminals.iter().map(Terminal::id).collect()
    }

    /// Total time in minutes.
    pub fn time_mins(&self) -> u64 {
        self.time_mins
    }

    /// Returns the total time as a Duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::try_from(self.time_mins).unwrap_or(i64::MAX))
    }

    /// Number of shuttles taken.
    pub fn hops(&self) -> usize {
        self.terminals.len() - 1
    }

    pub fn origin(&self) -> &Terminal {
        &self.terminals[0]
    }

    pub fn destination(&self) -> &Terminal {
        &self.terminals[self.terminals.len() - 1]
    }
}
