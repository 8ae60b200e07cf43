//! Lookahead search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected during one attribute decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Calls to `evaluate` (interior and leaf).
    pub nodes: u64,

    /// Nodes scored by the deck-size differential.
    pub leaves: u64,

    /// Rounds simulated on cloned decks.
    pub simulated_rounds: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Simulated rounds per second.
    #[must_use]
    pub fn rounds_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulated_rounds as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.leaves, 0);
        assert_eq!(stats.rounds_per_second(), 0.0);
    }

    #[test]
    fn test_rounds_per_second() {
        let mut stats = SearchStats::new();
        stats.simulated_rounds = 500;
        stats.time_us = 500_000;
        assert_eq!(stats.rounds_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats {
            nodes: 10,
            leaves: 4,
            simulated_rounds: 6,
            time_us: 1,
        };
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
