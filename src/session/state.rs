//! Session lifecycle states and the legal transitions between them.
//!
//! ```text
//! AwaitingDifficulty -> AwaitingCardSelection -> AwaitingAttributeSelection
//!     -> Resolving -> RoundComplete -> (AwaitingCardSelection | GameOver)
//! ```
//!
//! `Resolving` and `RoundComplete` are passed through inside a single call
//! and are never observed from outside. Any state may reset to
//! `AwaitingDifficulty`.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingDifficulty,
    AwaitingCardSelection,
    AwaitingAttributeSelection,
    Resolving,
    RoundComplete,
    GameOver { winner: Side },
}

impl SessionState {
    /// Whether `self -> next` is a legal step.
    #[must_use]
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (_, AwaitingDifficulty)
                | (AwaitingDifficulty, AwaitingCardSelection)
                | (AwaitingCardSelection, AwaitingAttributeSelection)
                | (AwaitingAttributeSelection, Resolving)
                | (Resolving, RoundComplete)
                | (RoundComplete, AwaitingCardSelection)
                | (RoundComplete, GameOver { .. })
        )
    }

    #[must_use]
    pub fn is_game_over(self) -> bool {
        matches!(self, SessionState::GameOver { .. })
    }

    /// Winner of a finished game.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            SessionState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::AwaitingDifficulty => write!(f, "awaiting difficulty"),
            SessionState::AwaitingCardSelection => write!(f, "awaiting card selection"),
            SessionState::AwaitingAttributeSelection => write!(f, "awaiting attribute selection"),
            SessionState::Resolving => write!(f, "resolving"),
            SessionState::RoundComplete => write!(f, "round complete"),
            SessionState::GameOver { winner } => write!(f, "over ({winner} won)"),
        }
    }
}
