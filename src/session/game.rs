//! A single game between the player and the AI.
//!
//! `GameSession` owns both decks, the scores, the turn owner and the
//! lifecycle state. Every public call validates first and commits last, so
//! a call that returns an error leaves the session exactly as it was.
//!
//! ## Round flow
//!
//! 1. `choose_difficulty` shuffles the catalog and deals it.
//! 2. `select_card` moves the player's chosen card and the AI's front card
//!    onto the table.
//! 3. The side owning the turn picks the attribute: the player through
//!    `select_attribute`, the AI through `play_ai_turn`.
//! 4. The round resolves, scores update, and the session either loops back
//!    to card selection or ends.
//!
//! A lone trump on the table does not resolve the round by itself. The
//! session still waits in `AwaitingAttributeSelection`: when the player owns
//! the turn the caller passes `select_attribute(None)` (any known attribute
//! also works), and when the AI owns it the caller runs `play_ai_turn`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::ai::{AiStrategySelector, Difficulty};
use crate::cards::{AttributeKey, Card, CardId, Catalog, Deck};
use crate::core::{
    CardSelection, GameConfig, GameError, GameResult, GameRng, Side, SideMap, TurnPolicy,
};
use crate::rules::{RoundResolver, RoundWinner};

use super::outcome::{RoundOutcome, SessionSnapshot};
use super::state::SessionState;

/// The two cards on the table for the current round.
#[derive(Clone, Debug)]
struct InPlay {
    player: Arc<Card>,
    ai: Arc<Card>,
}

/// One game session.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use trunfo::ai::Difficulty;
/// use trunfo::cards::{CatalogProvider, ClassicCatalog};
/// use trunfo::core::{GameConfig, Side};
/// use trunfo::session::{GameSession, SessionState};
///
/// let catalog = Arc::new(ClassicCatalog.load().unwrap());
/// let mut session = GameSession::new(catalog, GameConfig::default().with_seed(9));
/// session.choose_difficulty(Difficulty::Medium).unwrap();
///
/// let card = session.player_deck().peek_front().unwrap().id;
/// session.select_card(card).unwrap();
/// assert_eq!(session.state(), SessionState::AwaitingAttributeSelection);
/// assert_eq!(session.turn(), Side::Player);
///
/// let outcome = session.select_attribute(Some("speed".into())).unwrap();
/// assert_eq!(outcome.round, 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    catalog: Arc<Catalog>,
    deal_rng: GameRng,
    ai_rng: GameRng,
    difficulty: Option<Difficulty>,
    player_deck: Deck,
    ai_deck: Deck,
    in_play: Option<InPlay>,
    scores: SideMap<u32>,
    turn: Side,
    round: u32,
    state: SessionState,
}

impl GameSession {
    /// Create a session waiting for a difficulty.
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        let rng = GameRng::from_seed_opt(config.seed);

        Self {
            deal_rng: rng.for_context("deal"),
            ai_rng: rng.for_context("ai"),
            turn: config.first_turn,
            config,
            catalog,
            difficulty: None,
            player_deck: Deck::new(),
            ai_deck: Deck::new(),
            in_play: None,
            scores: SideMap::default(),
            round: 0,
            state: SessionState::AwaitingDifficulty,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Side choosing the attribute this round.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Rounds resolved so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn scores(&self) -> &SideMap<u32> {
        &self.scores
    }

    /// The player's deck, without any in-play card.
    #[must_use]
    pub fn player_deck(&self) -> &Deck {
        &self.player_deck
    }

    /// The AI's deck, without any in-play card.
    #[must_use]
    pub fn ai_deck(&self) -> &Deck {
        &self.ai_deck
    }

    /// `(player card, ai card)` on the table, if a round is under way.
    #[must_use]
    pub fn in_play(&self) -> Option<(&Arc<Card>, &Arc<Card>)> {
        self.in_play.as_ref().map(|table| (&table.player, &table.ai))
    }

    /// Winner of a finished game.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Set the difficulty, shuffle the catalog and deal it.
    ///
    /// The player receives the first half (rounded down) of the shuffled
    /// cards and the AI the rest.
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) -> GameResult<()> {
        self.require("choose_difficulty", SessionState::AwaitingDifficulty)?;
        self.config.validate()?;

        let mut cards = self.catalog.cards().to_vec();
        self.deal_rng.shuffle(&mut cards);
        let ai_cards = cards.split_off(cards.len() / 2);

        self.player_deck = Deck::from_cards(cards);
        self.ai_deck = Deck::from_cards(ai_cards);
        self.difficulty = Some(difficulty);
        self.scores = SideMap::default();
        self.turn = self.config.first_turn;
        self.round = 0;
        self.in_play = None;

        info!(
            %difficulty,
            player_cards = self.player_deck.len(),
            ai_cards = self.ai_deck.len(),
            first_turn = %self.turn,
            "dealt"
        );
        self.transition(SessionState::AwaitingCardSelection);
        self.auto_select()
    }

    /// Put the player's chosen card and the AI's front card on the table.
    pub fn select_card(&mut self, card: CardId) -> GameResult<()> {
        self.require("select_card", SessionState::AwaitingCardSelection)?;

        let mut player_deck = self.player_deck.clone();
        let mut ai_deck = self.ai_deck.clone();
        let player = player_deck.remove(card).ok_or(GameError::UnknownCard(card))?;
        let ai = ai_deck.draw()?;

        debug!(player_card = %player.id, ai_card = %ai.id, "cards in play");
        self.player_deck = player_deck;
        self.ai_deck = ai_deck;
        self.in_play = Some(InPlay { player, ai });
        self.transition(SessionState::AwaitingAttributeSelection);
        Ok(())
    }

    /// Resolve the round with the player's attribute.
    ///
    /// `None` is accepted only when exactly one in-play card is trump.
    pub fn select_attribute(
        &mut self,
        attribute: Option<AttributeKey>,
    ) -> GameResult<RoundOutcome> {
        self.require_turn("select_attribute", Side::Player)?;
        self.resolve_round(attribute)
    }

    /// Let the AI choose the attribute for its turn and resolve the round.
    pub fn play_ai_turn(&mut self) -> GameResult<RoundOutcome> {
        self.require_turn("play_ai_turn", Side::Ai)?;

        let table = self.table("play_ai_turn")?;
        let difficulty = self.difficulty.unwrap_or_default();
        let mut selector =
            AiStrategySelector::new(self.catalog.attributes(), self.config.search_mode);
        let key = selector
            .choose_attribute(
                difficulty,
                &table.ai,
                &table.player,
                &self.ai_deck,
                &self.player_deck,
                &mut self.ai_rng,
            )
            .ok_or(GameError::MissingAttribute)?;

        debug!(
            %difficulty,
            attribute = %key,
            nodes = selector.last_stats().nodes,
            "ai chose attribute"
        );
        self.resolve_round(Some(key))
    }

    /// Discard the game and wait for a new difficulty.
    pub fn reset(&mut self) {
        self.player_deck = Deck::new();
        self.ai_deck = Deck::new();
        self.in_play = None;
        self.scores = SideMap::default();
        self.difficulty = None;
        self.turn = self.config.first_turn;
        self.round = 0;
        self.transition(SessionState::AwaitingDifficulty);
    }

    /// Point-in-time copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            difficulty: self.difficulty,
            turn: self.turn,
            round: self.round,
            scores: self.scores,
            win_threshold: self.config.win_threshold,
            player_deck: self.player_deck.iter().cloned().collect(),
            ai_deck: self.ai_deck.iter().cloned().collect(),
            player_in_play: self.in_play.as_ref().map(|table| Arc::clone(&table.player)),
            ai_in_play: self.in_play.as_ref().map(|table| Arc::clone(&table.ai)),
        }
    }

    fn resolve_round(&mut self, attribute: Option<AttributeKey>) -> GameResult<RoundOutcome> {
        let table = self.table("resolve_round")?;
        if let Some(key) = &attribute {
            if !self.catalog.attributes().contains(key) {
                return Err(GameError::UnknownAttribute(key.clone()));
            }
        }
        let resolution = RoundResolver::resolve(
            attribute.as_ref(),
            &table.player,
            &table.ai,
            &self.player_deck,
            &self.ai_deck,
        )?;

        let chooser = self.turn;
        self.transition(SessionState::Resolving);
        resolution.award(&mut self.scores);
        self.player_deck = resolution.player_deck;
        self.ai_deck = resolution.ai_deck;
        self.in_play = None;
        self.round += 1;
        self.transition(SessionState::RoundComplete);

        debug!(
            round = self.round,
            %chooser,
            attribute = attribute.as_ref().map(AttributeKey::as_str),
            winner = %resolution.winner,
            player_score = self.scores[Side::Player],
            ai_score = self.scores[Side::Ai],
            "round resolved"
        );

        let game_winner = self.terminal_winner();
        match game_winner {
            Some(winner) => {
                info!(%winner, rounds = self.round, "game over");
                self.transition(SessionState::GameOver { winner });
            }
            None => {
                self.turn = self.next_turn(chooser, resolution.winner);
                self.transition(SessionState::AwaitingCardSelection);
            }
        }

        let outcome = RoundOutcome {
            round: self.round,
            chooser,
            attribute,
            winner: resolution.winner,
            trump_decided: resolution.trump_decided,
            player_card: table.player,
            ai_card: table.ai,
            player_value: resolution.player_value,
            ai_value: resolution.ai_value,
            scores: self.scores,
            player_deck_len: self.player_deck.len(),
            ai_deck_len: self.ai_deck.len(),
            game_winner,
        };

        if game_winner.is_none() {
            self.auto_select()?;
        }
        Ok(outcome)
    }

    /// Player conditions are checked first.
    fn terminal_winner(&self) -> Option<Side> {
        let threshold = self.config.win_threshold;
        if self.scores[Side::Player] >= threshold || self.ai_deck.is_empty() {
            Some(Side::Player)
        } else if self.scores[Side::Ai] >= threshold || self.player_deck.is_empty() {
            Some(Side::Ai)
        } else {
            None
        }
    }

    fn next_turn(&self, chooser: Side, winner: RoundWinner) -> Side {
        match self.config.turn_policy {
            TurnPolicy::Alternate => chooser.opponent(),
            TurnPolicy::WinnerPicks => winner.side().unwrap_or(chooser),
        }
    }

    fn auto_select(&mut self) -> GameResult<()> {
        if self.config.card_selection != CardSelection::FrontOnly {
            return Ok(());
        }
        match self.player_deck.peek_front().map(|card| card.id) {
            Some(front) => self.select_card(front),
            None => Err(GameError::EmptyDeck),
        }
    }

    fn table(&self, action: &'static str) -> GameResult<InPlay> {
        self.in_play.clone().ok_or(GameError::InvalidTransition {
            action,
            state: self.state,
        })
    }

    fn require(&self, action: &'static str, expected: SessionState) -> GameResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn require_turn(&self, action: &'static str, side: Side) -> GameResult<()> {
        self.require(action, SessionState::AwaitingAttributeSelection)?;
        if self.turn == side {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
    }
}
