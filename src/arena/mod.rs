//! AI-versus-AI evaluation of difficulty tiers.
//!
//! Plays full sessions where tier A drives the player seat through an
//! `AiStrategySelector` on the player's side of the table and tier B is the
//! session's own AI. Cards are always played from the front of each deck.
//! Game `i` is seeded with `seed_offset + i`, so a report is reproducible.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{AiStrategySelector, Difficulty};
use crate::cards::Catalog;
use crate::core::{CardSelection, GameConfig, GameError, GameResult, GameRng, Side, SideMap};
use crate::session::GameSession;

/// Configuration for an arena run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Number of games to play.
    pub games: u32,

    /// Round cap per game. Capped games count as unfinished.
    pub max_rounds: u32,

    /// Seed of the first game.
    pub seed_offset: u64,

    /// Session rules. Card selection and seed are overridden per game.
    pub game: GameConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 100,
            max_rounds: 500,
            seed_offset: 0,
            game: GameConfig::default(),
        }
    }
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    #[must_use]
    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

/// Result of one arena game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub rounds: u32,
    /// `Player` is tier A, `Ai` is tier B. `None` when capped.
    pub winner: Option<Side>,
    pub scores: SideMap<u32>,
}

/// Aggregate over all games of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaReport {
    pub tier_a: Difficulty,
    pub tier_b: Difficulty,
    pub games: u32,
    pub tier_a_wins: u32,
    pub tier_b_wins: u32,
    pub unfinished: u32,
    pub total_rounds: u64,
}

impl ArenaReport {
    fn new(tier_a: Difficulty, tier_b: Difficulty) -> Self {
        Self {
            tier_a,
            tier_b,
            games: 0,
            tier_a_wins: 0,
            tier_b_wins: 0,
            unfinished: 0,
            total_rounds: 0,
        }
    }

    fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_rounds += u64::from(game.rounds);
        match game.winner {
            Some(Side::Player) => self.tier_a_wins += 1,
            Some(Side::Ai) => self.tier_b_wins += 1,
            None => self.unfinished += 1,
        }
    }

    /// Mean rounds per game.
    #[must_use]
    pub fn average_rounds(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_rounds as f64 / f64::from(self.games)
        }
    }

    /// Tier A's share of finished games.
    #[must_use]
    pub fn tier_a_win_rate(&self) -> f64 {
        let finished = self.tier_a_wins + self.tier_b_wins;
        if finished == 0 {
            0.0
        } else {
            f64::from(self.tier_a_wins) / f64::from(finished)
        }
    }
}

/// Runs tier-versus-tier matches.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    config: ArenaConfig,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Play every configured game of `tier_a` (player seat) against
    /// `tier_b` (AI seat).
    pub fn run(
        &self,
        catalog: &Arc<Catalog>,
        tier_a: Difficulty,
        tier_b: Difficulty,
    ) -> GameResult<ArenaReport> {
        let mut report = ArenaReport::new(tier_a, tier_b);

        for index in 0..self.config.games {
            let seed = self.config.seed_offset.wrapping_add(u64::from(index));
            let game = self.play_game(catalog, tier_a, tier_b, seed)?;
            debug!(seed, rounds = game.rounds, winner = ?game.winner, "arena game finished");
            report.record(&game);
        }

        info!(
            %tier_a,
            %tier_b,
            games = report.games,
            tier_a_wins = report.tier_a_wins,
            tier_b_wins = report.tier_b_wins,
            unfinished = report.unfinished,
            "arena run complete"
        );
        Ok(report)
    }

    /// Play a single seeded game.
    pub fn play_game(
        &self,
        catalog: &Arc<Catalog>,
        tier_a: Difficulty,
        tier_b: Difficulty,
        seed: u64,
    ) -> GameResult<GameRecord> {
        let config = self
            .config
            .game
            .clone()
            .with_card_selection(CardSelection::FrontOnly)
            .with_seed(seed);
        let search_mode = config.search_mode;
        let mut session = GameSession::new(Arc::clone(catalog), config);
        let mut rng = GameRng::new(seed).for_context("arena");
        session.choose_difficulty(tier_b)?;

        while !session.state().is_game_over() && session.round() < self.config.max_rounds {
            match session.turn() {
                Side::Player => {
                    let key = {
                        let (player_card, ai_card) =
                            session.in_play().ok_or(GameError::InvalidTransition {
                                action: "arena_turn",
                                state: session.state(),
                            })?;
                        let mut selector =
                            AiStrategySelector::new(session.catalog().attributes(), search_mode);
                        selector.choose_attribute(
                            tier_a,
                            player_card,
                            ai_card,
                            session.player_deck(),
                            session.ai_deck(),
                            &mut rng,
                        )
                    };
                    session.select_attribute(key)?;
                }
                Side::Ai => {
                    session.play_ai_turn()?;
                }
            }
        }

        Ok(GameRecord {
            seed,
            rounds: session.round(),
            winner: session.winner(),
            scores: *session.scores(),
        })
    }
}
