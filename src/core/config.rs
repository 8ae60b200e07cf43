//! Game configuration types.
//!
//! A session is configured once at creation:
//! - `win_threshold`: score that ends the game
//! - `CardSelection`: whether the player may pick any card or always plays the front one
//! - `TurnPolicy`: who chooses the attribute in the next round
//! - `SearchMode`: asymmetric (default) or symmetric lookahead for the search tiers
//! - `seed`: deterministic dealing and Easy-tier choices when set

use serde::{Deserialize, Serialize};

use crate::ai::SearchMode;

use super::{GameError, GameResult, Side};

/// Score needed to win when no deck runs out first.
pub const DEFAULT_WIN_THRESHOLD: u32 = 5;

/// How the player's card is chosen each round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSelection {
    /// The front card is selected automatically.
    FrontOnly,
    /// Any card in the player's deck may be played.
    #[default]
    FreeChoice,
}

/// Who chooses the attribute for the next round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPolicy {
    /// The chooser alternates every round, whatever the outcome.
    #[default]
    Alternate,
    /// The round winner chooses next; a draw keeps the current chooser.
    WinnerPicks,
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use trunfo::core::{CardSelection, GameConfig, TurnPolicy};
///
/// let config = GameConfig::default()
///     .with_win_threshold(3)
///     .with_card_selection(CardSelection::FrontOnly)
///     .with_turn_policy(TurnPolicy::WinnerPicks)
///     .with_seed(7);
///
/// assert_eq!(config.win_threshold, 3);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// A side reaching this score wins.
    pub win_threshold: u32,

    /// Player card selection mode.
    pub card_selection: CardSelection,

    /// Attribute chooser rotation.
    pub turn_policy: TurnPolicy,

    /// Side choosing the attribute in the first round.
    pub first_turn: Side,

    /// Lookahead flavour used by the Hard and Expert tiers.
    pub search_mode: SearchMode,

    /// Seed for dealing and random AI choices. `None` uses entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_threshold: DEFAULT_WIN_THRESHOLD,
            card_selection: CardSelection::default(),
            turn_policy: TurnPolicy::default(),
            first_turn: Side::Player,
            search_mode: SearchMode::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the winning score.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Set the card selection mode.
    #[must_use]
    pub fn with_card_selection(mut self, selection: CardSelection) -> Self {
        self.card_selection = selection;
        self
    }

    /// Set the turn policy.
    #[must_use]
    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn_policy = policy;
        self
    }

    /// Set which side chooses first.
    #[must_use]
    pub fn with_first_turn(mut self, side: Side) -> Self {
        self.first_turn = side;
        self
    }

    /// Set the lookahead flavour.
    #[must_use]
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a game can be played under this config.
    ///
    /// Rejects a zero win threshold.
    pub fn validate(&self) -> GameResult<()> {
        if self.win_threshold == 0 {
            return Err(GameError::InvalidConfig("win threshold must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.win_threshold, 5);
        assert_eq!(config.card_selection, CardSelection::FreeChoice);
        assert_eq!(config.turn_policy, TurnPolicy::Alternate);
        assert_eq!(config.first_turn, Side::Player);
        assert_eq!(config.search_mode, SearchMode::Asymmetric);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new()
            .with_first_turn(Side::Ai)
            .with_search_mode(SearchMode::Symmetric)
            .with_seed(123);

        assert_eq!(config.first_turn, Side::Ai);
        assert_eq!(config.search_mode, SearchMode::Symmetric);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::default().with_win_threshold(1).validate().is_ok());
        assert!(matches!(
            GameConfig::default().with_win_threshold(0).validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_win_threshold(8).with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
