// Lineup planning orchestration.
//
// Runs the optimizer off the async runtime, computes the composite rating for
// every rostered player, and turns the borrowed search result into an owned
// report that can be printed or persisted.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use dugout_lineup::{
    composite_rating, derive_and_score, optimize_scored, LineupOptions, Player, PlayerId,
    SearchMethod, SlotArchetype,
};
use serde::Serialize;
use tracing::info;

use crate::db::Database;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One batting position in a finished lineup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupEntry {
    /// 1-based batting position.
    pub position: usize,
    pub archetype: SlotArchetype,
    pub player_id: PlayerId,
    pub name: String,
    pub jersey: Option<u32>,
    /// The player's score for this position's archetype.
    pub slot_score: f64,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupReport {
    pub method: SearchMethod,
    pub objective: f64,
    pub entries: Vec<LineupEntry>,
    /// Composite rating for every rostered player, in roster order.
    pub ratings: Vec<(PlayerId, f64)>,
}

impl LineupReport {
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.entries.iter().map(|e| e.player_id.clone()).collect()
    }

    /// Fixed-width table for terminal output.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>2}  {:<5} {:>4}  {:<24} {:>6} {:>6}",
            "#", "slot", "no.", "player", "score", "rcv"
        );
        for e in &self.entries {
            let jersey = e.jersey.map(|j| j.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                "{:>2}  {:<5} {:>4}  {:<24} {:>6.3} {:>6.3}",
                e.position,
                e.archetype.key(),
                jersey,
                e.name,
                e.slot_score,
                e.rating
            );
        }
        let _ = writeln!(out, "objective {:.4} ({})", self.objective, self.method);
        out
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Score, search, and rate synchronously.
pub fn build_report(players: &[Player], options: &LineupOptions) -> LineupReport {
    let scored = derive_and_score(players);
    let result = optimize_scored(&scored, options);

    let entries = result
        .lineup
        .iter()
        .enumerate()
        .map(|(pos, &player)| {
            let slot_score = scored
                .iter()
                .find(|s| std::ptr::eq(s.player, player))
                .map(|s| s.slots.for_position(pos))
                .unwrap_or(0.0);
            LineupEntry {
                position: pos + 1,
                archetype: SlotArchetype::for_position(pos),
                player_id: player.id.clone(),
                name: player.display_name(),
                jersey: player.jersey,
                slot_score,
                rating: composite_rating(&player.stats),
            }
        })
        .collect();

    let ratings = players
        .iter()
        .map(|p| (p.id.clone(), composite_rating(&p.stats)))
        .collect();

    LineupReport {
        method: result.method,
        objective: result.objective,
        entries,
        ratings,
    }
}

/// Plan a lineup on the blocking thread pool. The exhaustive branch can run
/// for a noticeable time on a full roster.
pub async fn plan_lineup(players: Vec<Player>, options: LineupOptions) -> Result<LineupReport> {
    info!(
        "Planning lineup for {} players (size={:?}, strategy={:?}, ceiling={})",
        players.len(),
        options.lineup_size,
        options.strategy,
        options.permutation_ceiling
    );

    let report = tokio::task::spawn_blocking(move || build_report(&players, &options))
        .await
        .context("lineup search task failed")?;

    info!(
        "Lineup ready: {} batters via {} (objective {:.4})",
        report.entries.len(),
        report.method,
        report.objective
    );
    Ok(report)
}

/// Write the ratings and the lineup to the store. Returns the lineup row id.
pub fn persist_report(db: &Database, report: &LineupReport) -> Result<i64> {
    db.save_ratings(&report.ratings)
        .context("failed to save ratings")?;
    let id = db
        .record_lineup(report.method.as_str(), report.objective, &report.player_ids())
        .context("failed to save lineup")?;
    info!("Persisted lineup #{} and {} ratings", id, report.ratings.len());
    Ok(id)
}
