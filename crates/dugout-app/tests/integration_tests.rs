// Integration tests for the lineup planner.
//
// These exercise the app end-to-end through the library crate's public API:
// shipped config defaults, CSV roster import, lineup planning on the blocking
// pool, and persistence to an in-memory store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dugout_app::app::{self, LineupReport};
use dugout_app::config::{self, Config};
use dugout_app::db::Database;
use dugout_app::roster::{self, RosterError};
use dugout_lineup::{LineupOptions, PlayerId, SearchMethod, SlotArchetype, Strategy};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURES).join(name)
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Scratch base dir with a copy of the shipped defaults.
fn scratch_base(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dugout_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    let defaults = dir.join("defaults");
    std::fs::create_dir_all(&defaults).unwrap();
    std::fs::copy(
        crate_root().join("defaults").join(config::CONFIG_FILE),
        defaults.join(config::CONFIG_FILE),
    )
    .unwrap();
    dir
}

fn assert_distinct(report: &LineupReport) {
    let unique: HashSet<&PlayerId> = report.entries.iter().map(|e| &e.player_id).collect();
    assert_eq!(unique.len(), report.entries.len());
}

// ===========================================================================
// Roster import
// ===========================================================================

#[test]
fn fixture_roster_loads_and_skips_idless_row() {
    let players = roster::load_roster(&fixture("roster.csv")).unwrap();
    assert_eq!(players.len(), 12);
    assert_eq!(players[0].id, PlayerId::Int(1));
    assert_eq!(players[0].display_name(), "Ava Smith");
    assert_eq!(players[0].stats.qab_pct, Some(0.62));

    let guest = players.last().unwrap();
    assert_eq!(guest.id, PlayerId::Text("g-1".into()));
    assert_eq!(guest.jersey, None);
    assert_eq!(guest.stats.qab_pct, None);
}

#[test]
fn missing_roster_file_is_reported() {
    let err = roster::load_roster(&fixture("no_such_roster.csv")).unwrap_err();
    assert!(matches!(err, RosterError::Io { .. }));
}

// ===========================================================================
// Config → plan → persist
// ===========================================================================

#[test]
fn first_run_copies_defaults_then_loads() {
    let base = scratch_base("first_run");
    let config: Config = config::load_config(&base).unwrap();
    assert!(base.join("config").join(config::CONFIG_FILE).exists());

    let options = config.lineup.options();
    assert_eq!(options, LineupOptions::default());
    assert_eq!(config.db_path, "dugout.db");
    assert_eq!(config.data_paths.roster, "data/roster.csv");
    let _ = std::fs::remove_dir_all(&base);
}

#[tokio::test]
async fn full_roster_falls_back_to_greedy() {
    // P(12, 9) is far past the default ceiling.
    let players = roster::load_roster(&fixture("roster.csv")).unwrap();
    let report = app::plan_lineup(players, LineupOptions::default())
        .await
        .unwrap();

    assert_eq!(report.method, SearchMethod::Greedy);
    assert_eq!(report.entries.len(), 9);
    assert_eq!(report.ratings.len(), 12);
    assert_distinct(&report);
    assert_eq!(report.entries[8].archetype, SlotArchetype::S9);
}

#[tokio::test]
async fn small_lineup_is_exhaustive_and_beats_greedy() {
    let players = roster::load_roster(&fixture("roster.csv")).unwrap();
    let options = LineupOptions {
        lineup_size: Some(5),
        ..LineupOptions::default()
    };
    let exhaustive = app::plan_lineup(players.clone(), options).await.unwrap();
    let greedy = app::plan_lineup(
        players,
        LineupOptions {
            strategy: Strategy::Greedy,
            ..options
        },
    )
    .await
    .unwrap();

    assert_eq!(exhaustive.method, SearchMethod::Exhaustive);
    assert_eq!(greedy.method, SearchMethod::Greedy);
    assert_eq!(exhaustive.entries.len(), 5);
    assert_distinct(&exhaustive);
    assert!(exhaustive.objective + 1e-9 >= greedy.objective);
}

#[tokio::test]
async fn planned_lineup_round_trips_through_database() {
    let players = roster::load_roster(&fixture("roster.csv")).unwrap();
    let report = app::plan_lineup(
        players,
        LineupOptions {
            lineup_size: Some(4),
            ..LineupOptions::default()
        },
    )
    .await
    .unwrap();

    let db = Database::open(":memory:").unwrap();
    let id = app::persist_report(&db, &report).unwrap();

    let stored = db.load_latest_lineup().unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.method, report.method.as_str());
    assert_eq!(stored.objective, report.objective);
    let expected: Vec<String> = report.player_ids().iter().map(ToString::to_string).collect();
    assert_eq!(stored.player_ids, expected);

    for (player_id, rating) in &report.ratings {
        assert_eq!(db.load_rating(player_id).unwrap(), Some(*rating));
    }
}
