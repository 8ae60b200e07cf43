//! Error types surfaced by the engine and the session API.
//!
//! No operation that returns an error leaves a session partially mutated.

use thiserror::Error;

use crate::cards::{AttributeKey, CardId};
use crate::session::{SessionId, SessionState};

/// Convenience alias used across the crate.
pub type GameResult<T> = Result<T, GameError>;

/// Failures of engine operations and session API calls.
#[derive(Debug, Error)]
pub enum GameError {
    /// A draw was attempted on an empty deck.
    ///
    /// The terminal check should make this unreachable mid-game; seeing it
    /// means the state machine let a round start without cards.
    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    /// The call is not permitted in the session's current state.
    #[error("`{action}` is not allowed while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    /// The attribute key is not part of the catalog's key set.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(AttributeKey),

    /// No trump decides the round, so an attribute must be given.
    #[error("an attribute is required unless a single trump card decides the round")]
    MissingAttribute,

    /// The selected card is not in the player's deck.
    #[error("{0} is not in the player's deck")]
    UnknownCard(CardId),

    /// The catalog could not produce a playable deck.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The session configuration cannot produce a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// No session is registered under this id.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
}

/// Failures building a catalog from a provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("catalog needs at least two cards to deal, found {found}")]
    TooSmall { found: usize },

    #[error("catalog cards have no attributes")]
    NoAttributes,

    #[error("duplicate card id {0}")]
    DuplicateId(CardId),

    #[error("{card} does not carry exactly the catalog attribute set")]
    InconsistentAttributes { card: CardId },

    #[error("{card} has a non-finite value for `{attribute}`")]
    NonFiniteValue { card: CardId, attribute: AttributeKey },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
