// Batting lineup optimizer: derive rate metrics from raw counters, score each
// player against the batting-order slot archetypes, and search for the
// highest-scoring ordered lineup.
//
// Pure computation over an in-memory roster snapshot; no I/O.

pub mod metrics;
pub mod normalize;
pub mod player;
pub mod rating;
pub mod scoring;
pub mod search;
pub mod slots;

pub use metrics::{derive_raw_metrics, RawMetrics};
pub use normalize::{normalize_min_max, normalize_speed, NormalizedMetrics};
pub use player::{Player, PlayerId, PlayerStats};
pub use rating::composite_rating;
pub use scoring::{derive_and_score, PlayerScores};
pub use search::{
    optimize_lineup, optimize_scored, permutation_count, LineupOptions, LineupResult,
    SearchMethod, Strategy,
};
pub use slots::{
    batter_weight, score_slots, SlotArchetype, SlotScores, SlotWeights, BATTER_WEIGHTS, SLOT_ORDER,
    SLOT_WEIGHTS,
};
