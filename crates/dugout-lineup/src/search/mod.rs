// Lineup search: pick and order a subset of the pool into batting slots.
//
// Exhaustive enumeration is used while the number of ordered k-subsets stays
// under the permutation ceiling; past that (or on request) a single greedy
// pass fills the slots instead. The weight-assign strategy skips slot scores
// for placement and arranges the top composite ratings by position weight.

mod exhaustive;
mod greedy;
mod weight_assign;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::player::Player;
use crate::scoring::{derive_and_score, PlayerScores};

/// Tie-break grid step: floats rounding to the same multiple are tied.
pub const TIE_EPSILON: f64 = 1e-9;

/// Lineup size used when the caller does not ask for one.
pub const DEFAULT_LINEUP_SIZE: usize = 9;

/// Default cap on enumerated permutations before falling back to greedy.
pub const DEFAULT_PERMUTATION_CEILING: u64 = 500_000;

// ---------------------------------------------------------------------------
// Options / results
// ---------------------------------------------------------------------------

/// Requested search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Exhaustive,
    Greedy,
    #[serde(rename = "weight-assign", alias = "weight_assign")]
    WeightAssign,
}

impl Strategy {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "exhaustive" => Some(Strategy::Exhaustive),
            "greedy" => Some(Strategy::Greedy),
            "weight-assign" | "weight_assign" => Some(Strategy::WeightAssign),
            _ => None,
        }
    }
}

/// Branch that actually produced a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    Exhaustive,
    Greedy,
    #[serde(rename = "weight-assign")]
    WeightAssign,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Exhaustive => "exhaustive",
            SearchMethod::Greedy => "greedy",
            SearchMethod::WeightAssign => "weight-assign",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupOptions {
    /// Requested lineup length; silently clamped to the pool size.
    pub lineup_size: Option<usize>,
    pub strategy: Strategy,
    pub permutation_ceiling: u64,
    /// Split the exhaustive branch across threads. Has no effect unless the
    /// `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for LineupOptions {
    fn default() -> Self {
        LineupOptions {
            lineup_size: Some(DEFAULT_LINEUP_SIZE),
            strategy: Strategy::Exhaustive,
            permutation_ceiling: DEFAULT_PERMUTATION_CEILING,
            parallel: false,
        }
    }
}

/// Ordered lineup plus how it was found.
#[derive(Debug, Clone)]
pub struct LineupResult<'a> {
    pub lineup: Vec<&'a Player>,
    pub method: SearchMethod,
    /// Sum of each chosen player's score for the archetype of their slot.
    pub objective: f64,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// `P(n, k) = n! / (n - k)!`, saturating at `u128::MAX`. Zero when `k > n`.
pub fn permutation_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    ((n - k + 1)..=n).fold(1u128, |acc, f| acc.saturating_mul(f as u128))
}

/// Score the pool and search for the best lineup.
pub fn optimize_lineup<'a>(players: &'a [Player], options: &LineupOptions) -> LineupResult<'a> {
    let scored = derive_and_score(players);
    optimize_scored(&scored, options)
}

/// Search over an already scored pool.
pub fn optimize_scored<'a>(pool: &[PlayerScores<'a>], options: &LineupOptions) -> LineupResult<'a> {
    let n = pool.len();
    let k = options.lineup_size.unwrap_or(DEFAULT_LINEUP_SIZE).min(n);
    let permutations = permutation_count(n, k);

    let method = match options.strategy {
        Strategy::Exhaustive if permutations <= u128::from(options.permutation_ceiling) => {
            SearchMethod::Exhaustive
        }
        Strategy::WeightAssign => SearchMethod::WeightAssign,
        _ => SearchMethod::Greedy,
    };
    debug!(
        pool = n,
        lineup_size = k,
        permutations,
        ceiling = options.permutation_ceiling,
        method = method.as_str(),
        "selected lineup search branch"
    );

    let (order, objective) = match method {
        SearchMethod::Exhaustive => exhaustive::search(pool, k, options.parallel),
        SearchMethod::Greedy => greedy::search(pool, k),
        SearchMethod::WeightAssign => weight_assign::search(pool, k),
    };

    LineupResult {
        lineup: order.into_iter().map(|i| pool[i].player).collect(),
        method,
        objective,
    }
}
