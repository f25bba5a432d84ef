// Metrics -> normalization -> slot scores, bundled per player.

use crate::metrics::{derive_raw_metrics, RawMetrics};
use crate::normalize::{normalize_pool, NormalizedMetrics};
use crate::player::Player;
use crate::slots::{score_slots, SlotScores};

/// Everything the searcher needs to know about one candidate.
///
/// Built fresh on every invocation and never cached: normalization depends on
/// the whole pool.
#[derive(Debug, Clone, Copy)]
pub struct PlayerScores<'a> {
    pub player: &'a Player,
    pub raw: RawMetrics,
    pub normalized: NormalizedMetrics,
    pub slots: SlotScores,
}

/// Derive, normalize and slot-score every player, in pool order.
pub fn derive_and_score(players: &[Player]) -> Vec<PlayerScores<'_>> {
    let raw_by_id = derive_raw_metrics(players);

    let raw: Vec<RawMetrics> = players
        .iter()
        .map(|p| raw_by_id.get(&p.id).copied().unwrap_or_default())
        .collect();
    let normalized = normalize_pool(&raw);

    players
        .iter()
        .zip(raw)
        .zip(normalized)
        .map(|((player, raw), normalized)| PlayerScores {
            player,
            raw,
            normalized,
            slots: score_slots(&normalized),
        })
        .collect()
}
