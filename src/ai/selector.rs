//! Difficulty tiers and the AI's attribute choice.
//!
//! | Tier   | Strategy                                   |
//! |--------|--------------------------------------------|
//! | Easy   | uniform random attribute                   |
//! | Medium | greedy one-ply advantage                   |
//! | Hard   | lookahead, depth 2 after the current round |
//! | Expert | lookahead, depth 3 after the current round |
//!
//! A trump front card short-circuits every tier: the round is already won,
//! so the first attribute is returned without searching.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::{AttributeKey, AttributeSet, Card, Deck};
use crate::core::{GameRng, Side};

use super::greedy::GreedyAdvisor;
use super::lookahead::{LookaheadSearch, SearchMode};
use super::stats::SearchStats;

/// AI strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers from weakest to strongest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Lookahead depth evaluated after the simulated current round.
    #[must_use]
    pub const fn search_depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy | Difficulty::Medium => None,
            Difficulty::Hard => Some(2),
            Difficulty::Expert => Some(3),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// Error parsing a difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty `{0}`")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" | "impossible" => Ok(Difficulty::Expert),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Chooses the attribute for the side whose turn it is.
///
/// All arguments are from the choosing side's point of view: `own_card` is
/// the chooser's in-play card and `own_deck` its deck without that card.
/// Live decks are only read; the search works on clones.
#[derive(Debug)]
pub struct AiStrategySelector<'a> {
    attributes: &'a AttributeSet,
    mode: SearchMode,
    last_stats: SearchStats,
}

impl<'a> AiStrategySelector<'a> {
    pub fn new(attributes: &'a AttributeSet, mode: SearchMode) -> Self {
        Self {
            attributes,
            mode,
            last_stats: SearchStats::default(),
        }
    }

    /// Search counters of the most recent decision (zero for non-search tiers).
    #[must_use]
    pub fn last_stats(&self) -> &SearchStats {
        &self.last_stats
    }

    /// Pick the attribute to play. `None` only for an empty key set.
    pub fn choose_attribute(
        &mut self,
        difficulty: Difficulty,
        own_card: &Arc<Card>,
        opponent_card: &Arc<Card>,
        own_deck: &Deck,
        opponent_deck: &Deck,
        rng: &mut GameRng,
    ) -> Option<AttributeKey> {
        self.last_stats.reset();

        if own_card.is_trump {
            return self.attributes.first().cloned();
        }

        match difficulty.search_depth() {
            None if difficulty == Difficulty::Easy => {
                rng.choose(self.attributes.as_slice()).cloned()
            }
            None => {
                GreedyAdvisor::best_attribute(self.attributes, own_card, opponent_card).cloned()
            }
            Some(depth) => self.search(depth, own_card, opponent_card, own_deck, opponent_deck),
        }
    }

    fn search(
        &mut self,
        depth: u32,
        own_card: &Arc<Card>,
        opponent_card: &Arc<Card>,
        own_deck: &Deck,
        opponent_deck: &Deck,
    ) -> Option<AttributeKey> {
        let start = Instant::now();
        let mut search = LookaheadSearch::new(self.attributes, self.mode);
        let mut best: Option<(&AttributeKey, i64)> = None;

        // The chooser sits in the search's maximizing (AI) seat.
        for key in self.attributes.iter() {
            let value = search.score_move(
                depth,
                Side::Ai,
                key,
                opponent_card,
                own_card,
                opponent_deck,
                own_deck,
            );
            trace!(attribute = %key, value, depth, "lookahead candidate");
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((key, value)),
            }
        }

        search.stats_mut().time_us = start.elapsed().as_micros() as u64;
        self.last_stats = search.stats().clone();
        best.map(|(key, _)| key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn keys() -> AttributeSet {
        AttributeSet::new(["speed", "power"])
    }

    fn car(id: u32, speed: f64, power: f64) -> Arc<Card> {
        Arc::new(
            Card::new(CardId::new(id), format!("Car {id}"))
                .with_attr("speed", speed)
                .with_attr("power", power),
        )
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("impossible".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("nightmare".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_search_depths() {
        assert_eq!(Difficulty::Easy.search_depth(), None);
        assert_eq!(Difficulty::Medium.search_depth(), None);
        assert_eq!(Difficulty::Hard.search_depth(), Some(2));
        assert_eq!(Difficulty::Expert.search_depth(), Some(3));
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Expert).unwrap();
        assert_eq!(json, "\"expert\"");
    }

    #[test]
    fn test_trump_short_circuits_every_tier() {
        let keys = keys();
        let mut selector = AiStrategySelector::new(&keys, SearchMode::Asymmetric);
        let mut rng = GameRng::new(1);
        let trump = Arc::new(
            Card::new(CardId(9), "Trump")
                .with_attr("speed", 0.0)
                .with_attr("power", 0.0)
                .trump(),
        );
        let other = car(1, 100.0, 100.0);

        for difficulty in Difficulty::ALL {
            let choice = selector
                .choose_attribute(difficulty, &trump, &other, &Deck::new(), &Deck::new(), &mut rng)
                .unwrap();
            assert_eq!(choice.as_str(), "speed");
            assert_eq!(selector.last_stats().nodes, 0);
        }
    }

    #[test]
    fn test_easy_stays_within_key_set() {
        let keys = keys();
        let mut selector = AiStrategySelector::new(&keys, SearchMode::Asymmetric);
        let mut rng = GameRng::new(3);
        let own = car(1, 1.0, 2.0);
        let opp = car(2, 2.0, 1.0);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let key = selector
                .choose_attribute(
                    Difficulty::Easy,
                    &own,
                    &opp,
                    &Deck::new(),
                    &Deck::new(),
                    &mut rng,
                )
                .unwrap();
            assert!(keys.contains(&key));
            seen.insert(key);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_medium_is_greedy() {
        let keys = keys();
        let mut selector = AiStrategySelector::new(&keys, SearchMode::Asymmetric);
        let mut rng = GameRng::new(0);
        let own = car(1, 5.0, 20.0);
        let opp = car(2, 10.0, 1.0);

        let key = selector
            .choose_attribute(Difficulty::Medium, &own, &opp, &Deck::new(), &Deck::new(), &mut rng)
            .unwrap();
        assert_eq!(key.as_str(), "power");
    }

    #[test]
    fn test_hard_searches_and_records_stats() {
        let keys = keys();
        let mut selector = AiStrategySelector::new(&keys, SearchMode::Asymmetric);
        let mut rng = GameRng::new(0);
        let own = car(1, 5.0, 20.0);
        let opp = car(2, 10.0, 1.0);
        let own_deck = Deck::from_cards([car(3, 7.0, 7.0)]);
        let opp_deck = Deck::from_cards([car(4, 6.0, 6.0)]);

        let key = selector
            .choose_attribute(Difficulty::Hard, &own, &opp, &own_deck, &opp_deck, &mut rng)
            .unwrap();
        assert_eq!(key.as_str(), "power");
        assert!(selector.last_stats().nodes > 0);
        assert_eq!(own_deck.len(), 1);
        assert_eq!(opp_deck.len(), 1);
    }
}
