//! Values returned to callers of the session API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::cards::{AttributeKey, Card};
use crate::core::{Side, SideMap};
use crate::rules::RoundWinner;

use super::state::SessionState;

/// Everything a caller needs to present a resolved round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// 1-based round number.
    pub round: u32,

    /// Side that chose the attribute.
    pub chooser: Side,

    /// Attribute played; `None` when a trump decided without one.
    pub attribute: Option<AttributeKey>,

    pub winner: RoundWinner,

    /// A lone trump decided the round.
    pub trump_decided: bool,

    /// Both played cards with their full attribute values.
    pub player_card: Arc<Card>,
    pub ai_card: Arc<Card>,

    /// Compared values, when an attribute was played.
    pub player_value: Option<f64>,
    pub ai_value: Option<f64>,

    /// Scores after this round.
    pub scores: SideMap<u32>,

    pub player_deck_len: usize,
    pub ai_deck_len: usize,

    /// Set when this round ended the game.
    pub game_winner: Option<Side>,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_winner.is_some()
    }
}

/// Point-in-time view of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub difficulty: Option<Difficulty>,
    /// Side choosing the attribute this round.
    pub turn: Side,
    /// Rounds resolved so far.
    pub round: u32,
    pub scores: SideMap<u32>,
    pub win_threshold: u32,
    /// Decks front to back, excluding in-play cards.
    pub player_deck: Vec<Arc<Card>>,
    pub ai_deck: Vec<Arc<Card>>,
    /// Cards drawn for the current round, if any.
    pub player_in_play: Option<Arc<Card>>,
    pub ai_in_play: Option<Arc<Card>>,
}

impl SessionSnapshot {
    /// Cards accounted for across both decks and the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.player_deck.len()
            + self.ai_deck.len()
            + usize::from(self.player_in_play.is_some())
            + usize::from(self.ai_in_play.is_some())
    }
}
