//! Arena integration tests.

use std::sync::Arc;

use trunfo::ai::{Difficulty, SearchMode};
use trunfo::arena::{Arena, ArenaConfig, ArenaReport};
use trunfo::cards::{CatalogProvider, ClassicCatalog};
use trunfo::core::{GameConfig, TurnPolicy};

#[test]
fn test_run_is_reproducible() {
    let catalog = Arc::new(ClassicCatalog.load().unwrap());
    let arena = Arena::new(ArenaConfig::new().with_games(6).with_seed_offset(1_000));

    let a = arena.run(&catalog, Difficulty::Hard, Difficulty::Medium).unwrap();
    let b = arena.run(&catalog, Difficulty::Hard, Difficulty::Medium).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.tier_a, Difficulty::Hard);
    assert_eq!(a.tier_b, Difficulty::Medium);
}

#[test]
fn test_symmetric_search_and_winner_picks() {
    let catalog = Arc::new(ClassicCatalog.load().unwrap());
    let game = GameConfig::default()
        .with_search_mode(SearchMode::Symmetric)
        .with_turn_policy(TurnPolicy::WinnerPicks);
    let arena = Arena::new(ArenaConfig::new().with_games(4).with_game_config(game));

    let report = arena.run(&catalog, Difficulty::Expert, Difficulty::Expert).unwrap();
    assert_eq!(report.tier_a_wins + report.tier_b_wins + report.unfinished, 4);
}

#[test]
fn test_report_serializes() {
    let catalog = Arc::new(ClassicCatalog.load().unwrap());
    let report = Arena::new(ArenaConfig::new().with_games(2))
        .run(&catalog, Difficulty::Easy, Difficulty::Medium)
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: ArenaReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
