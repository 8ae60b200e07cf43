//! # trunfo
//!
//! Round-resolution engine and attribute-choosing AI for a two-player
//! "top trumps" card game: each round both sides put a card on the table,
//! the side owning the turn names a numeric attribute, the higher value
//! takes both cards, and a single trump card beats everything.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: `RoundResolver::resolve` is a pure function of the
//!    attribute, the two in-play cards and the two decks.
//!
//! 2. **Cheap simulation**: decks are persistent `im::Vector`s, so the
//!    lookahead clones them in O(1) and never touches live state.
//!
//! 3. **No partial mutation**: every session call validates before it
//!    commits; an error leaves the session as it was.
//!
//! ## Modules
//!
//! - `core`: sides, RNG, configuration, errors
//! - `cards`: attribute keys, cards, decks, catalogs
//! - `rules`: round resolution and card transfer
//! - `ai`: greedy advisor, lookahead search, difficulty tiers
//! - `session`: game sessions and the session manager
//! - `arena`: AI-versus-AI evaluation of difficulty tiers
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use trunfo::{ClassicCatalog, CatalogProvider, Difficulty, GameConfig, SessionManager, Side};
//!
//! let manager = SessionManager::new(GameConfig::default().with_seed(1));
//! let id = manager
//!     .create_session(Arc::new(ClassicCatalog.load().unwrap()), Difficulty::Expert, 5)
//!     .unwrap();
//!
//! while !manager.snapshot(id).unwrap().state.is_game_over() {
//!     let snapshot = manager.snapshot(id).unwrap();
//!     manager.select_card(id, snapshot.player_deck[0].id).unwrap();
//!     match snapshot.turn {
//!         Side::Player => manager.select_attribute(id, Some("power".into())).unwrap(),
//!         Side::Ai => manager.play_ai_turn(id).unwrap(),
//!     };
//! }
//! assert!(manager.snapshot(id).unwrap().state.winner().is_some());
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod ai;
pub mod session;
pub mod arena;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng,
    GameConfig, CardSelection, TurnPolicy, DEFAULT_WIN_THRESHOLD,
    GameError, CatalogError, GameResult,
};

pub use crate::cards::{
    AttributeKey, AttributeSet, Attributes,
    Card, CardId, Deck,
    Catalog, CatalogProvider, StaticCatalog, JsonCatalog, ClassicCatalog,
};

pub use crate::rules::{RoundResolver, RoundWinner, Resolution};

pub use crate::ai::{
    AiStrategySelector, Difficulty,
    GreedyAdvisor, LookaheadSearch, SearchMode, SearchStats,
};

pub use crate::session::{
    GameSession, SessionManager, SessionId, SessionState,
    RoundOutcome, SessionSnapshot,
};

pub use crate::arena::{Arena, ArenaConfig, ArenaReport};
