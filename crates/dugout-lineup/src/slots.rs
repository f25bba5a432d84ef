// Batting-order slot archetypes and their skill weightings.
//
// The weight table is policy data. Search code only looks archetypes up
// through `SLOT_WEIGHTS` / `SLOT_ORDER` and never hardcodes coefficients.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalize::NormalizedMetrics;

// ---------------------------------------------------------------------------
// Archetypes
// ---------------------------------------------------------------------------

/// Role profile for a batting-order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotArchetype {
    /// Leadoff.
    S1,
    S2,
    S3,
    /// Cleanup.
    S4,
    S5,
    /// Middle order, used for both the 6th and 7th spots.
    Smid,
    S8,
    S9,
}

impl SlotArchetype {
    pub const ALL: [SlotArchetype; 8] = [
        SlotArchetype::S1,
        SlotArchetype::S2,
        SlotArchetype::S3,
        SlotArchetype::S4,
        SlotArchetype::S5,
        SlotArchetype::Smid,
        SlotArchetype::S8,
        SlotArchetype::S9,
    ];

    fn index(self) -> usize {
        match self {
            SlotArchetype::S1 => 0,
            SlotArchetype::S2 => 1,
            SlotArchetype::S3 => 2,
            SlotArchetype::S4 => 3,
            SlotArchetype::S5 => 4,
            SlotArchetype::Smid => 5,
            SlotArchetype::S8 => 6,
            SlotArchetype::S9 => 7,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SlotArchetype::S1 => "S1",
            SlotArchetype::S2 => "S2",
            SlotArchetype::S3 => "S3",
            SlotArchetype::S4 => "S4",
            SlotArchetype::S5 => "S5",
            SlotArchetype::Smid => "Smid",
            SlotArchetype::S8 => "S8",
            SlotArchetype::S9 => "S9",
        }
    }

    /// Archetype for a 0-indexed lineup position. Positions past the end of
    /// `SLOT_ORDER` fall back to `Smid`.
    pub fn for_position(position: usize) -> Self {
        SLOT_ORDER.get(position).copied().unwrap_or(SlotArchetype::Smid)
    }
}

impl fmt::Display for SlotArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Weight table
// ---------------------------------------------------------------------------

/// Linear weights over the normalized metrics `(obr, bip, pwr, spd)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotWeights {
    pub obr: f64,
    pub bip: f64,
    pub pwr: f64,
    pub spd: f64,
}

impl SlotWeights {
    pub fn sum(&self) -> f64 {
        self.obr + self.bip + self.pwr + self.spd
    }

    pub fn apply(&self, m: &NormalizedMetrics) -> f64 {
        self.obr * m.obr + self.bip * m.bip + self.pwr * m.pwr + self.spd * m.spd
    }
}

const fn w(obr: f64, bip: f64, pwr: f64, spd: f64) -> SlotWeights {
    SlotWeights { obr, bip, pwr, spd }
}

/// Per-archetype weightings. Each row sums to 1.0.
pub const SLOT_WEIGHTS: [(SlotArchetype, SlotWeights); 8] = [
    (SlotArchetype::S1, w(0.50, 0.15, 0.00, 0.35)),
    (SlotArchetype::S2, w(0.45, 0.45, 0.00, 0.10)),
    (SlotArchetype::S3, w(0.45, 0.30, 0.25, 0.00)),
    (SlotArchetype::S4, w(0.30, 0.15, 0.55, 0.00)),
    (SlotArchetype::S5, w(0.35, 0.20, 0.45, 0.00)),
    (SlotArchetype::Smid, w(0.45, 0.40, 0.00, 0.15)),
    (SlotArchetype::S8, w(0.40, 0.40, 0.00, 0.20)),
    (SlotArchetype::S9, w(0.45, 0.20, 0.00, 0.35)),
];

/// Canonical nine-man batting order shape. Shorter lineups use a prefix.
pub const SLOT_ORDER: [SlotArchetype; 9] = [
    SlotArchetype::S1,
    SlotArchetype::S2,
    SlotArchetype::S3,
    SlotArchetype::S4,
    SlotArchetype::S5,
    SlotArchetype::Smid,
    SlotArchetype::Smid,
    SlotArchetype::S8,
    SlotArchetype::S9,
];

/// Batting-position importance for the rating-ranked arrangement, one entry
/// per position of the nine-man order.
pub const BATTER_WEIGHTS: [f64; 9] = [1.05, 1.10, 1.12, 1.15, 1.08, 1.00, 0.95, 0.92, 0.97];

/// Weight of a 0-indexed position; positions past the table weigh 1.0.
pub fn batter_weight(position: usize) -> f64 {
    BATTER_WEIGHTS.get(position).copied().unwrap_or(1.0)
}

/// Look up the weights for an archetype.
pub fn weights_for(archetype: SlotArchetype) -> SlotWeights {
    SLOT_WEIGHTS[archetype.index()].1
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// One score per archetype for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlotScores {
    scores: [f64; 8],
}

impl SlotScores {
    pub fn get(&self, archetype: SlotArchetype) -> f64 {
        self.scores[archetype.index()]
    }

    /// Score for a 0-indexed lineup position.
    pub fn for_position(&self, position: usize) -> f64 {
        self.get(SlotArchetype::for_position(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotArchetype, f64)> + '_ {
        SlotArchetype::ALL.iter().map(move |a| (*a, self.get(*a)))
    }

    #[cfg(test)]
    pub(crate) fn uniform(score: f64) -> Self {
        SlotScores { scores: [score; 8] }
    }
}

/// Score a player's normalized metrics against every archetype.
pub fn score_slots(normalized: &NormalizedMetrics) -> SlotScores {
    let mut scores = [0.0; 8];
    for (archetype, weights) in SLOT_WEIGHTS.iter() {
        scores[archetype.index()] = weights.apply(normalized);
    }
    SlotScores { scores }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn table_rows_line_up_with_archetype_index() {
        for (i, (archetype, _)) in SLOT_WEIGHTS.iter().enumerate() {
            assert_eq!(archetype.index(), i, "{archetype} out of place");
        }
    }

    #[test]
    fn every_row_sums_to_one() {
        for (archetype, weights) in SLOT_WEIGHTS.iter() {
            assert!(
                approx_eq(weights.sum(), 1.0, 1e-9),
                "{archetype} weights sum to {}",
                weights.sum()
            );
        }
    }

    #[test]
    fn leadoff_formula() {
        let m = NormalizedMetrics { obr: 1.0, bip: 0.5, pwr: 0.9, spd: 0.2 };
        // 0.50*1.0 + 0.35*0.2 + 0.15*0.5
        assert!(approx_eq(score_slots(&m).get(SlotArchetype::S1), 0.645, 1e-12));
    }

    #[test]
    fn cleanup_formula() {
        let m = NormalizedMetrics { obr: 0.4, bip: 0.6, pwr: 1.0, spd: 1.0 };
        // 0.55*1.0 + 0.30*0.4 + 0.15*0.6
        assert!(approx_eq(score_slots(&m).get(SlotArchetype::S4), 0.76, 1e-12));
    }

    #[test]
    fn scores_bounded_by_unit_interval() {
        let top = score_slots(&NormalizedMetrics { obr: 1.0, bip: 1.0, pwr: 1.0, spd: 1.0 });
        let bottom = score_slots(&NormalizedMetrics::default());
        for (_, s) in top.iter() {
            assert!(approx_eq(s, 1.0, 1e-9));
        }
        for (_, s) in bottom.iter() {
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn slot_order_mapping() {
        assert_eq!(SlotArchetype::for_position(0), SlotArchetype::S1);
        assert_eq!(SlotArchetype::for_position(3), SlotArchetype::S4);
        assert_eq!(SlotArchetype::for_position(5), SlotArchetype::Smid);
        assert_eq!(SlotArchetype::for_position(6), SlotArchetype::Smid);
        assert_eq!(SlotArchetype::for_position(8), SlotArchetype::S9);
        assert_eq!(SlotArchetype::for_position(9), SlotArchetype::Smid);
        assert_eq!(SlotArchetype::for_position(40), SlotArchetype::Smid);
    }
}
