//! Round resolution: trump override, attribute comparison, deck transfer.
//!
//! `RoundResolver::resolve` is pure. It receives the two in-play cards and
//! the decks they were taken from, and returns the updated decks instead of
//! mutating anything. The lookahead search reuses the same comparison and
//! transfer helpers on its simulated decks.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{AttributeKey, Card, Deck};
use crate::core::{GameError, GameResult, Side, SideMap};

/// Result of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    Player,
    Ai,
    Draw,
}

impl RoundWinner {
    /// The winning side, `None` on a draw.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            RoundWinner::Player => Some(Side::Player),
            RoundWinner::Ai => Some(Side::Ai),
            RoundWinner::Draw => None,
        }
    }

    #[must_use]
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::Player => RoundWinner::Player,
            Side::Ai => RoundWinner::Ai,
        }
    }
}

impl std::fmt::Display for RoundWinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundWinner::Player => write!(f, "Player"),
            RoundWinner::Ai => write!(f, "AI"),
            RoundWinner::Draw => write!(f, "Draw"),
        }
    }
}

/// Outcome of one card meeting another, from the first card's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clash {
    Win,
    Loss,
    Tie,
}

impl Clash {
    /// Strictly greater wins, equal ties.
    #[must_use]
    pub fn of_values(ours: f64, theirs: f64) -> Self {
        match ours.partial_cmp(&theirs) {
            Some(Ordering::Greater) => Clash::Win,
            Some(Ordering::Less) => Clash::Loss,
            _ => Clash::Tie,
        }
    }

    /// Decided by trump alone: exactly one of the two cards is trump.
    #[must_use]
    pub fn trump_override(ours: &Card, theirs: &Card) -> Option<Self> {
        match (ours.is_trump, theirs.is_trump) {
            (true, false) => Some(Clash::Win),
            (false, true) => Some(Clash::Loss),
            _ => None,
        }
    }

    /// Map to a round winner when `ours` is the given side's card.
    #[must_use]
    pub fn for_side(self, ours: Side) -> RoundWinner {
        match self {
            Clash::Win => RoundWinner::from_side(ours),
            Clash::Loss => RoundWinner::from_side(ours.opponent()),
            Clash::Tie => RoundWinner::Draw,
        }
    }
}

/// Move both played cards according to the round winner.
///
/// The winner appends its own card, then the loser's. On a draw each card
/// goes to the back of its own deck.
pub fn transfer(
    winner: RoundWinner,
    player_card: Arc<Card>,
    ai_card: Arc<Card>,
    player_deck: &mut Deck,
    ai_deck: &mut Deck,
) {
    match winner {
        RoundWinner::Player => player_deck.append([player_card, ai_card]),
        RoundWinner::Ai => ai_deck.append([ai_card, player_card]),
        RoundWinner::Draw => {
            player_deck.append([player_card]);
            ai_deck.append([ai_card]);
        }
    }
}

/// Everything a resolved round produces.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub winner: RoundWinner,
    /// A lone trump decided the round; the attribute played no part.
    pub trump_decided: bool,
    /// Compared values, when an attribute was given.
    pub player_value: Option<f64>,
    pub ai_value: Option<f64>,
    pub player_deck: Deck,
    pub ai_deck: Deck,
}

impl Resolution {
    /// Add the round point to the winner's score. A draw scores nothing.
    pub fn award(&self, scores: &mut SideMap<u32>) {
        if let Some(side) = self.winner.side() {
            scores[side] += 1;
        }
    }
}

/// Resolves rounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundResolver;

impl RoundResolver {
    /// Resolve a round between two in-play cards.
    ///
    /// `player_deck` and `ai_deck` are the decks the cards were drawn from,
    /// without the in-play cards. `attribute` may be `None` only when exactly
    /// one card is trump.
    ///
    /// ## Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use trunfo::cards::{AttributeKey, Card, CardId, Deck};
    /// use trunfo::rules::{RoundResolver, RoundWinner};
    ///
    /// let player = Arc::new(Card::new(CardId::new(1), "Falcon GT").with_attr("speed", 320.0));
    /// let ai = Arc::new(Card::new(CardId::new(2), "Thunder R").with_attr("speed", 300.0));
    ///
    /// let speed = AttributeKey::new("speed");
    /// let res = RoundResolver::resolve(Some(&speed), &player, &ai, &Deck::new(), &Deck::new())
    ///     .unwrap();
    ///
    /// assert_eq!(res.winner, RoundWinner::Player);
    /// assert_eq!(res.player_deck.ids(), vec![CardId::new(1), CardId::new(2)]);
    /// assert!(res.ai_deck.is_empty());
    /// ```
    pub fn resolve(
        attribute: Option<&AttributeKey>,
        player_card: &Arc<Card>,
        ai_card: &Arc<Card>,
        player_deck: &Deck,
        ai_deck: &Deck,
    ) -> GameResult<Resolution> {
        let values = match attribute {
            Some(key) => Some((
                player_card
                    .value(key)
                    .ok_or_else(|| GameError::UnknownAttribute(key.clone()))?,
                ai_card
                    .value(key)
                    .ok_or_else(|| GameError::UnknownAttribute(key.clone()))?,
            )),
            None => None,
        };

        let trump = Clash::trump_override(player_card, ai_card);
        let clash = match (trump, values) {
            (Some(clash), _) => clash,
            (None, Some((p, a))) => Clash::of_values(p, a),
            (None, None) => return Err(GameError::MissingAttribute),
        };
        let winner = clash.for_side(Side::Player);

        let mut next_player = player_deck.clone();
        let mut next_ai = ai_deck.clone();
        transfer(
            winner,
            Arc::clone(player_card),
            Arc::clone(ai_card),
            &mut next_player,
            &mut next_ai,
        );

        Ok(Resolution {
            winner,
            trump_decided: trump.is_some(),
            player_value: values.map(|(p, _)| p),
            ai_value: values.map(|(_, a)| a),
            player_deck: next_player,
            ai_deck: next_ai,
        })
    }
}
