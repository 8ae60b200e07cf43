//! Session registry behind the caller-facing API.
//!
//! Sessions live in a `DashMap` keyed by a random [`SessionId`]. Every call
//! holds the entry's exclusive guard for its duration, so at most one
//! mutation is in flight per session while different sessions proceed
//! independently. Sessions idle for longer than the timeout are evicted by
//! [`SessionManager::cleanup_expired`], which also runs on every
//! [`SessionManager::create_session`].

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::ai::Difficulty;
use crate::cards::{AttributeKey, CardId, Catalog, CatalogProvider};
use crate::core::{GameConfig, GameError, GameResult};

use super::game::GameSession;
use super::outcome::{RoundOutcome, SessionSnapshot};

/// Idle time after which a session is evicted.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Opaque session handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// A fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

struct SessionEntry {
    session: GameSession,
    last_activity: Instant,
}

/// Owns every live session.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use trunfo::ai::Difficulty;
/// use trunfo::cards::{CatalogProvider, ClassicCatalog};
/// use trunfo::core::GameConfig;
/// use trunfo::session::{SessionManager, SessionState};
///
/// let manager = SessionManager::new(GameConfig::default().with_seed(3));
/// let catalog = Arc::new(ClassicCatalog.load().unwrap());
/// let id = manager.create_session(catalog, Difficulty::Hard, 5).unwrap();
///
/// let snapshot = manager.snapshot(id).unwrap();
/// assert_eq!(snapshot.state, SessionState::AwaitingCardSelection);
/// assert_eq!(snapshot.player_deck.len() + snapshot.ai_deck.len(), 11);
/// ```
pub struct SessionManager {
    sessions: DashMap<SessionId, SessionEntry>,
    config: GameConfig,
    idle_timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl SessionManager {
    /// `config` is the template for every new session; `create_session`
    /// overrides its win threshold.
    pub fn new(config: GameConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Create a session, choose its difficulty and deal.
    pub fn create_session(
        &self,
        catalog: Arc<Catalog>,
        difficulty: Difficulty,
        win_threshold: u32,
    ) -> GameResult<SessionId> {
        let config = self.config.clone().with_win_threshold(win_threshold);
        self.create_with_config(catalog, difficulty, config)
    }

    /// Load the catalog from `provider`, then [`Self::create_session`].
    ///
    /// Provider failures abort creation and are returned unchanged.
    pub fn create_from_provider(
        &self,
        provider: &dyn CatalogProvider,
        difficulty: Difficulty,
        win_threshold: u32,
    ) -> GameResult<SessionId> {
        let catalog = provider.load()?;
        self.create_session(Arc::new(catalog), difficulty, win_threshold)
    }

    /// Create a session with a full config of its own.
    pub fn create_with_config(
        &self,
        catalog: Arc<Catalog>,
        difficulty: Difficulty,
        config: GameConfig,
    ) -> GameResult<SessionId> {
        self.cleanup_expired();

        let id = SessionId::new();
        let mut session = GameSession::new(catalog, config);
        info_span!("session", %id).in_scope(|| session.choose_difficulty(difficulty))?;

        info!(
            %id,
            %difficulty,
            win_threshold = session.config().win_threshold,
            "session created"
        );
        self.sessions.insert(
            id,
            SessionEntry {
                session,
                last_activity: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Deal a new game in a session waiting for a difficulty.
    pub fn choose_difficulty(&self, id: SessionId, difficulty: Difficulty) -> GameResult<()> {
        self.with_session(id, |session| session.choose_difficulty(difficulty))
    }

    pub fn select_card(&self, id: SessionId, card: CardId) -> GameResult<()> {
        self.with_session(id, |session| session.select_card(card))
    }

    pub fn select_attribute(
        &self,
        id: SessionId,
        attribute: Option<AttributeKey>,
    ) -> GameResult<RoundOutcome> {
        self.with_session(id, |session| session.select_attribute(attribute))
    }

    pub fn play_ai_turn(&self, id: SessionId) -> GameResult<RoundOutcome> {
        self.with_session(id, GameSession::play_ai_turn)
    }

    pub fn snapshot(&self, id: SessionId) -> GameResult<SessionSnapshot> {
        self.with_session(id, |session| Ok(session.snapshot()))
    }

    /// Discard the game; the session waits for a new difficulty.
    pub fn reset_session(&self, id: SessionId) -> GameResult<()> {
        self.with_session(id, |session| {
            session.reset();
            Ok(())
        })
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove_session(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(%id, "session removed");
        }
        removed
    }

    /// Evict sessions idle for longer than the timeout. Returns how many.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.sessions.len();
        let timeout = self.idle_timeout;
        self.sessions
            .retain(|_, entry| entry.last_activity.elapsed() <= timeout);

        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            warn!(evicted, timeout_secs = timeout.as_secs(), "evicted idle sessions");
        }
        evicted
    }

    fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut GameSession) -> GameResult<R>,
    ) -> GameResult<R> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or(GameError::SessionNotFound(id))?;
        entry.last_activity = Instant::now();
        info_span!("session", %id).in_scope(|| f(&mut entry.session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AttributeSet, Card, ClassicCatalog, StaticCatalog};
    use crate::core::{CatalogError, Side};
    use crate::session::SessionState;

    fn classic() -> Arc<Catalog> {
        Arc::new(ClassicCatalog.load().unwrap())
    }

    fn manager() -> SessionManager {
        SessionManager::new(GameConfig::default().with_seed(21))
    }

    #[test]
    fn test_session_id_roundtrip() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_create_and_snapshot() {
        let manager = manager();
        let id = manager.create_session(classic(), Difficulty::Easy, 3).unwrap();

        let snapshot = manager.snapshot(id).unwrap();
        assert_eq!(snapshot.state, SessionState::AwaitingCardSelection);
        assert_eq!(snapshot.win_threshold, 3);
        assert_eq!(snapshot.player_deck.len(), 5);
        assert_eq!(snapshot.ai_deck.len(), 6);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_unknown_session() {
        let manager = manager();
        let id = SessionId::new();
        assert!(matches!(
            manager.snapshot(id),
            Err(GameError::SessionNotFound(missing)) if missing == id
        ));
        assert!(!manager.remove_session(id));
    }

    #[test]
    fn test_catalog_error_aborts_creation() {
        let manager = manager();
        let provider = StaticCatalog::new(
            AttributeSet::new(["speed"]),
            vec![Card::new(CardId::new(1), "Solo").with_attr("speed", 1.0)],
        );

        let err = manager
            .create_from_provider(&provider, Difficulty::Easy, 5)
            .unwrap_err();

        assert!(matches!(err, GameError::Catalog(CatalogError::TooSmall { found: 1 })));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_zero_win_threshold_aborts_creation() {
        let manager = manager();
        let err = manager
            .create_session(classic(), Difficulty::Easy, 0)
            .unwrap_err();

        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_round_through_manager() {
        let manager = manager();
        let id = manager.create_session(classic(), Difficulty::Medium, 5).unwrap();
        let front = manager.snapshot(id).unwrap().player_deck[0].id;

        manager.select_card(id, front).unwrap();
        let outcome = manager.select_attribute(id, Some("power".into())).unwrap();

        assert_eq!(outcome.chooser, Side::Player);
        assert_eq!(outcome.player_card.id, front);
        let snapshot = manager.snapshot(id).unwrap();
        assert_eq!(snapshot.total_cards(), 11);
        assert_eq!(snapshot.turn, Side::Ai);
    }

    #[test]
    fn test_reset_then_choose_difficulty() {
        let manager = manager();
        let id = manager.create_session(classic(), Difficulty::Easy, 5).unwrap();

        manager.reset_session(id).unwrap();
        assert_eq!(manager.snapshot(id).unwrap().state, SessionState::AwaitingDifficulty);

        manager.choose_difficulty(id, Difficulty::Expert).unwrap();
        let snapshot = manager.snapshot(id).unwrap();
        assert_eq!(snapshot.difficulty, Some(Difficulty::Expert));
        assert_eq!(snapshot.total_cards(), 11);
    }

    #[test]
    fn test_remove_session() {
        let manager = manager();
        let id = manager.create_session(classic(), Difficulty::Easy, 5).unwrap();
        assert!(manager.remove_session(id));
        assert!(!manager.contains(id));
    }

    #[test]
    fn test_cleanup_expired() {
        let manager = manager().with_idle_timeout(Duration::ZERO);
        let id = manager.create_session(classic(), Difficulty::Easy, 5).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(manager.cleanup_expired(), 1);
        assert!(matches!(manager.snapshot(id), Err(GameError::SessionNotFound(_))));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_active_sessions_survive_cleanup() {
        let manager = manager();
        let id = manager.create_session(classic(), Difficulty::Easy, 5).unwrap();
        assert_eq!(manager.cleanup_expired(), 0);
        assert!(manager.contains(id));
    }
}
