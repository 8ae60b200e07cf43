//! Attribute-selection AI.
//!
//! ## Overview
//!
//! - `GreedyAdvisor`: one-ply best advantage, also the assumed opponent reply
//! - `LookaheadSearch`: depth-bounded search over simulated deck states
//! - `AiStrategySelector`: maps a `Difficulty` to a strategy and returns the
//!   attribute to play
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use trunfo::ai::{AiStrategySelector, Difficulty, SearchMode};
//! use trunfo::cards::{AttributeSet, Card, CardId, Deck};
//! use trunfo::core::GameRng;
//!
//! let keys = AttributeSet::new(["speed", "power"]);
//! let ai_card = Arc::new(
//!     Card::new(CardId::new(1), "Veloce S")
//!         .with_attr("speed", 330.0)
//!         .with_attr("power", 520.0),
//! );
//! let player_card = Arc::new(
//!     Card::new(CardId::new(2), "Aurora X")
//!         .with_attr("speed", 310.0)
//!         .with_attr("power", 470.0),
//! );
//!
//! let mut selector = AiStrategySelector::new(&keys, SearchMode::Asymmetric);
//! let mut rng = GameRng::new(42);
//! let key = selector.choose_attribute(
//!     Difficulty::Expert, &ai_card, &player_card, &Deck::new(), &Deck::new(), &mut rng,
//! );
//! assert!(key.is_some());
//! ```

pub mod greedy;
pub mod lookahead;
pub mod selector;
pub mod stats;

pub use greedy::{advantage, GreedyAdvisor};
pub use lookahead::{clash, deck_differential, LookaheadSearch, SearchMode};
pub use selector::{AiStrategySelector, Difficulty, ParseDifficultyError};
pub use stats::SearchStats;
