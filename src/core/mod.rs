//! Core engine types: sides, RNG, configuration, errors.
//!
//! These are shared by every other module and carry no game rules themselves.

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{CardSelection, GameConfig, TurnPolicy, DEFAULT_WIN_THRESHOLD};
pub use error::{CatalogError, GameError, GameResult};
pub use rng::GameRng;
pub use side::{Side, SideMap};
