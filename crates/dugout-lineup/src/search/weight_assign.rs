// Rating-ranked arrangement: the top `k` composite ratings are dealt onto
// batting positions in descending `BATTER_WEIGHTS` order.
//
// Slot scores play no part in placement; the objective is still reported as
// the slot-score sum of the resulting order so results stay comparable.

use crate::rating::composite_rating;
use crate::scoring::PlayerScores;
use crate::slots::batter_weight;

/// Best-rated player goes to the heaviest position, second-best to the next,
/// and so on. Rating ties keep pool order; weight ties keep position order.
pub(super) fn search(pool: &[PlayerScores<'_>], k: usize) -> (Vec<usize>, f64) {
    let k = k.min(pool.len());

    let mut ranked: Vec<(usize, f64)> = pool
        .iter()
        .enumerate()
        .map(|(i, s)| (i, composite_rating(&s.player.stats)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut positions: Vec<usize> = (0..k).collect();
    positions.sort_by(|&a, &b| batter_weight(b).total_cmp(&batter_weight(a)));

    let mut order = vec![0; k];
    for (&position, &(i, _)) in positions.iter().zip(&ranked) {
        order[position] = i;
    }

    let objective: f64 = order
        .iter()
        .enumerate()
        .map(|(position, &i)| pool[i].slots.for_position(position))
        .sum();

    (order, objective)
}
