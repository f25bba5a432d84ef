// Composite run-creation rating stored back onto player records by callers.

use crate::player::{counter, PlayerStats};

/// `0.35*OBP + 0.25*SLG + 0.15*BA + RBI/G + 0.10*QAB%`.
///
/// Missing inputs read as 0; the RBI-per-game term is 0 when `games <= 0`.
/// Unlike the slot scores this is not pool-relative, so values are
/// comparable across rosters.
pub fn composite_rating(stats: &PlayerStats) -> f64 {
    let obp = counter(stats.obp);
    let slg = counter(stats.slg);
    let ba = counter(stats.ba);
    let rbi = counter(stats.rbi);
    let games = counter(stats.games);
    let qab_pct = counter(stats.qab_pct);

    let rbi_per_game = if games > 0.0 { rbi / games } else { 0.0 };

    0.35 * obp + 0.25 * slg + 0.15 * ba + rbi_per_game + 0.10 * qab_pct
}
