//! Depth-bounded lookahead over simulated deck states.
//!
//! The search scores positions by `ai_deck.len() - player_deck.len()`, so
//! the AI is always the maximizing side. To search on behalf of the player
//! seat, pass the decks with their roles swapped.
//!
//! ## Asymmetric search (default)
//!
//! At each ply only the side to move branches, over every attribute of its
//! front card. The other side does not branch: its reply is fixed to the
//! greedy one-ply choice against the mover's card. This is not minimax; the
//! opponent is modelled as a greedy responder, never searched to depth.
//!
//! ## Symmetric search
//!
//! The non-mover also branches over every attribute and takes the reply
//! that is worst for the mover.
//!
//! Every branch works on O(1) clones of the decks it was given; inputs are
//! never mutated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{AttributeKey, AttributeSet, Card, Deck};
use crate::core::Side;
use crate::rules::{transfer, Clash};

use super::greedy::GreedyAdvisor;
use super::stats::SearchStats;

/// How the non-moving side is modelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Opponent reply fixed to the greedy choice.
    #[default]
    Asymmetric,
    /// Opponent branches over all replies and picks the worst for the mover.
    Symmetric,
}

/// Static evaluation: AI deck size minus player deck size.
#[must_use]
pub fn deck_differential(player_deck: &Deck, ai_deck: &Deck) -> i64 {
    ai_deck.len() as i64 - player_deck.len() as i64
}

/// Compare the mover's card on `key` against the opponent's card on `reply`.
///
/// A lone trump decides; otherwise the two values are compared.
#[must_use]
pub fn clash(mover: &Card, key: &AttributeKey, opponent: &Card, reply: &AttributeKey) -> Clash {
    Clash::trump_override(mover, opponent).unwrap_or_else(|| {
        Clash::of_values(
            mover.value(key).unwrap_or(0.0),
            opponent.value(reply).unwrap_or(0.0),
        )
    })
}

/// Lookahead evaluator over one catalog's attribute set.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use trunfo::ai::{LookaheadSearch, SearchMode};
/// use trunfo::cards::{AttributeSet, Card, CardId, Deck};
///
/// let keys = AttributeSet::new(["speed", "power"]);
/// let p = Arc::new(
///     Card::new(CardId::new(1), "P").with_attr("speed", 10.0).with_attr("power", 1.0),
/// );
/// let a = Arc::new(
///     Card::new(CardId::new(2), "A").with_attr("speed", 5.0).with_attr("power", 20.0),
/// );
///
/// let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
/// let player_deck = Deck::from_cards([p]);
/// let ai_deck = Deck::from_cards([a]);
///
/// assert_eq!(search.evaluate(0, true, &player_deck, &ai_deck), 0);
/// assert_eq!(search.evaluate(1, true, &player_deck, &ai_deck), 2);
/// ```
#[derive(Debug)]
pub struct LookaheadSearch<'a> {
    attributes: &'a AttributeSet,
    mode: SearchMode,
    stats: SearchStats,
}

impl<'a> LookaheadSearch<'a> {
    pub fn new(attributes: &'a AttributeSet, mode: SearchMode) -> Self {
        Self {
            attributes,
            mode,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Counters accumulated since creation or the last reset.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    /// Value of a position with the given side to move.
    ///
    /// `maximizing` is true when the AI moves. With `depth == 0` or an empty
    /// deck the value is `ai_deck.len() - player_deck.len()`.
    pub fn evaluate(
        &mut self,
        depth: u32,
        maximizing: bool,
        player_deck: &Deck,
        ai_deck: &Deck,
    ) -> i64 {
        self.stats.nodes += 1;

        if depth == 0 || player_deck.is_empty() || ai_deck.is_empty() {
            self.stats.leaves += 1;
            return deck_differential(player_deck, ai_deck);
        }

        let mut player_rest = player_deck.clone();
        let mut ai_rest = ai_deck.clone();
        let (Ok(player_card), Ok(ai_card)) = (player_rest.draw(), ai_rest.draw()) else {
            self.stats.leaves += 1;
            return deck_differential(player_deck, ai_deck);
        };

        let mover = if maximizing { Side::Ai } else { Side::Player };
        let attributes = self.attributes;
        let mut best: Option<i64> = None;

        for key in attributes.iter() {
            let value = self.score_move(
                depth - 1,
                mover,
                key,
                &player_card,
                &ai_card,
                &player_rest,
                &ai_rest,
            );
            best = Some(match best {
                None => value,
                Some(b) if maximizing => b.max(value),
                Some(b) => b.min(value),
            });
        }

        match best {
            Some(value) => value,
            None => {
                self.stats.leaves += 1;
                deck_differential(player_deck, ai_deck)
            }
        }
    }

    /// Value of `mover` playing `key` with both cards already in play.
    ///
    /// The opponent's reply follows the search mode, the round is simulated
    /// on clones of `player_rest`/`ai_rest` (the decks without the in-play
    /// cards), and the resulting position is evaluated to `child_depth` with
    /// the other side to move.
    #[allow(clippy::too_many_arguments)]
    pub fn score_move(
        &mut self,
        child_depth: u32,
        mover: Side,
        key: &AttributeKey,
        player_card: &Arc<Card>,
        ai_card: &Arc<Card>,
        player_rest: &Deck,
        ai_rest: &Deck,
    ) -> i64 {
        let (mover_card, opponent_card) = match mover {
            Side::Player => (player_card, ai_card),
            Side::Ai => (ai_card, player_card),
        };
        let next_to_move_is_ai = mover.opponent() == Side::Ai;

        match self.mode {
            SearchMode::Asymmetric => {
                let attributes = self.attributes;
                let reply = GreedyAdvisor::best_attribute(attributes, opponent_card, mover_card)
                    .unwrap_or(key);
                self.play_out(
                    child_depth,
                    mover,
                    key,
                    reply,
                    player_card,
                    ai_card,
                    player_rest,
                    ai_rest,
                    next_to_move_is_ai,
                )
            }
            SearchMode::Symmetric => {
                let attributes = self.attributes;
                let mut worst: Option<i64> = None;
                for reply in attributes.iter() {
                    let value = self.play_out(
                        child_depth,
                        mover,
                        key,
                        reply,
                        player_card,
                        ai_card,
                        player_rest,
                        ai_rest,
                        next_to_move_is_ai,
                    );
                    // The replying side optimizes for itself.
                    worst = Some(match worst {
                        None => value,
                        Some(w) if mover == Side::Player => w.max(value),
                        Some(w) => w.min(value),
                    });
                }
                worst.unwrap_or_else(|| deck_differential(player_rest, ai_rest))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn play_out(
        &mut self,
        child_depth: u32,
        mover: Side,
        key: &AttributeKey,
        reply: &AttributeKey,
        player_card: &Arc<Card>,
        ai_card: &Arc<Card>,
        player_rest: &Deck,
        ai_rest: &Deck,
        next_to_move_is_ai: bool,
    ) -> i64 {
        let (mover_card, opponent_card) = match mover {
            Side::Player => (player_card, ai_card),
            Side::Ai => (ai_card, player_card),
        };
        let winner = clash(mover_card, key, opponent_card, reply).for_side(mover);

        let mut next_player = player_rest.clone();
        let mut next_ai = ai_rest.clone();
        transfer(
            winner,
            Arc::clone(player_card),
            Arc::clone(ai_card),
            &mut next_player,
            &mut next_ai,
        );
        self.stats.simulated_rounds += 1;

        self.evaluate(child_depth, next_to_move_is_ai, &next_player, &next_ai)
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
    fn test_base_case_is_deck_differential() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let pd = Deck::from_cards([car(1, 1.0, 1.0), car(2, 1.0, 1.0), car(3, 1.0, 1.0)]);
        let ad = Deck::from_cards([car(4, 1.0, 1.0)]);

        assert_eq!(search.evaluate(0, true, &pd, &ad), -2);
        assert_eq!(search.evaluate(0, false, &pd, &ad), -2);
    }

    #[test]
    fn test_empty_deck_is_leaf() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let pd = Deck::from_cards([car(1, 1.0, 1.0), car(2, 1.0, 1.0)]);

        assert_eq!(search.evaluate(3, true, &pd, &Deck::new()), -2);
        assert_eq!(search.stats().leaves, 1);
    }

    #[test]
    fn test_ai_to_move_picks_best_branch() {
        // Player replies on speed (its greedy pick); AI wins only on power.
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let pd = Deck::from_cards([car(1, 10.0, 1.0)]);
        let ad = Deck::from_cards([car(2, 5.0, 20.0)]);

        assert_eq!(search.evaluate(1, true, &pd, &ad), 2);
        assert_eq!(search.stats().nodes, 3);
        assert_eq!(search.stats().leaves, 2);
        assert_eq!(search.stats().simulated_rounds, 2);
    }

    #[test]
    fn test_player_to_move_faces_greedy_reply() {
        // AI answers with power (20) whatever the player picks.
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let pd = Deck::from_cards([car(1, 10.0, 1.0)]);
        let ad = Deck::from_cards([car(2, 5.0, 20.0)]);

        assert_eq!(search.evaluate(1, false, &pd, &ad), 2);
    }

    #[test]
    fn test_symmetric_opponent_branches() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Symmetric);
        let pd = Deck::from_cards([car(1, 10.0, 1.0)]);
        let ad = Deck::from_cards([car(2, 5.0, 20.0)]);

        assert_eq!(search.evaluate(1, true, &pd, &ad), 2);
        // 2 moves x 2 replies
        assert_eq!(search.stats().simulated_rounds, 4);
    }

    #[test]
    fn test_trump_mover_always_wins_branch() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let trump = Arc::new(
            Card::new(CardId(9), "Trump")
                .with_attr("speed", 0.0)
                .with_attr("power", 0.0)
                .trump(),
        );
        let pd = Deck::from_cards([car(1, 500.0, 500.0)]);
        let ad = Deck::from_cards([trump]);

        assert_eq!(search.evaluate(1, true, &pd, &ad), 2);
        assert_eq!(search.evaluate(1, false, &pd, &ad), 2);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let pd = Deck::from_cards([car(1, 10.0, 1.0), car(3, 4.0, 4.0)]);
        let ad = Deck::from_cards([car(2, 5.0, 20.0), car(4, 3.0, 3.0)]);

        let _ = search.evaluate(3, true, &pd, &ad);

        assert_eq!(pd.ids(), vec![CardId(1), CardId(3)]);
        assert_eq!(ad.ids(), vec![CardId(2), CardId(4)]);
    }

    #[test]
    fn test_score_move_top_level() {
        let keys = keys();
        let mut search = LookaheadSearch::new(&keys, SearchMode::Asymmetric);
        let p = car(1, 10.0, 1.0);
        let a = car(2, 5.0, 20.0);

        let speed = AttributeKey::new("speed");
        let power = AttributeKey::new("power");
        assert_eq!(search.score_move(0, Side::Ai, &speed, &p, &a, &Deck::new(), &Deck::new()), -2);
        assert_eq!(search.score_move(0, Side::Ai, &power, &p, &a, &Deck::new(), &Deck::new()), 2);
    }
}
