// Rate metrics derived from raw box-score counters.

use std::collections::HashMap;

use crate::player::{counter, Player, PlayerId, PlayerStats};

/// Upper bound of the speed rating scale.
pub const SPEED_MAX: f64 = 10.0;

/// Per-player rate metrics for one optimizer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawMetrics {
    /// On-base rate proxy: `(h + bb + roe) / pa`.
    pub obr: f64,
    /// Ball-in-play rate: `1 - so / pa`.
    pub bip: f64,
    /// Power rate: `xbh / pa`.
    pub pwr: f64,
    /// Speed rating clamped into `[0, SPEED_MAX]`.
    pub spd: f64,
}

impl RawMetrics {
    /// Compute the rate metrics for a single stats bag.
    ///
    /// With `pa == 0` every rate is 0 rather than NaN, and a rate that
    /// overflows also reads as 0. Negative counters are
    /// taken as-is; only the speed rating is clamped.
    pub fn from_stats(stats: &PlayerStats) -> Self {
        let pa = counter(stats.pa);
        let h = counter(stats.h);
        let bb = counter(stats.bb);
        let so = counter(stats.so);
        let xbh = counter(stats.xbh);
        let roe = counter(stats.roe);
        let spd = counter(stats.spd).clamp(0.0, SPEED_MAX);

        if pa == 0.0 {
            return RawMetrics {
                obr: 0.0,
                bip: 0.0,
                pwr: 0.0,
                spd,
            };
        }

        RawMetrics {
            obr: finite_or_zero((h + bb + roe) / pa),
            bip: finite_or_zero(1.0 - so / pa),
            pwr: finite_or_zero(xbh / pa),
            spd,
        }
    }
}

/// Rates that overflow (huge counters over a tiny `pa`) read as 0.
fn finite_or_zero(rate: f64) -> f64 {
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Derive rate metrics for every player, keyed by player id.
///
/// Players sharing an id collapse into a single entry (the last one wins).
pub fn derive_raw_metrics(players: &[Player]) -> HashMap<PlayerId, RawMetrics> {
    players
        .iter()
        .map(|p| (p.id.clone(), RawMetrics::from_stats(&p.stats)))
        .collect()
}
