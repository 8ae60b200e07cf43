//! Game sessions and the caller-facing session API.
//!
//! - `GameSession`: one game, its decks, scores and lifecycle state
//! - `SessionManager`: registry of live sessions keyed by `SessionId`
//! - `RoundOutcome` / `SessionSnapshot`: values handed back to callers

pub mod game;
pub mod manager;
pub mod outcome;
pub mod state;

pub use game::GameSession;
pub use manager::{SessionId, SessionManager, DEFAULT_IDLE_TIMEOUT};
pub use outcome::{RoundOutcome, SessionSnapshot};
pub use state::SessionState;
