// Greedy slot filling: one pass over the slots, no backtracking.
//
// O(k * n). Not guaranteed optimal; used when the permutation count is past
// the ceiling or when the caller asks for it.

use crate::scoring::PlayerScores;

/// Fill slots `0..k` in order, each with the best remaining player for that
/// slot's archetype. Ties on slot score go to the higher normalized OBR, and
/// after that to the earlier player in pool order.
pub(super) fn search(pool: &[PlayerScores<'_>], k: usize) -> (Vec<usize>, f64) {
    let mut available: Vec<usize> = (0..pool.len()).collect();
    let mut order = Vec::with_capacity(k);
    let mut objective = 0.0;

    for position in 0..k.min(pool.len()) {
        let mut pick: Option<(usize, f64)> = None;
        for (slot, &i) in available.iter().enumerate() {
            let score = pool[i].slots.for_position(position);
            let better = match pick {
                None => true,
                Some((current, current_score)) => {
                    let current = available[current];
                    score > current_score
                        || (score == current_score
                            && pool[i].normalized.obr > pool[current].normalized.obr)
                }
            };
            if better {
                pick = Some((slot, score));
            }
        }
        let Some((slot, score)) = pick else {
            break;
        };
        order.push(available.remove(slot));
        objective += score;
    }

    (order, objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Player, PlayerStats};
    use crate::scoring::derive_and_score;

    fn player(id: i64, pa: f64, h: f64, so: f64, xbh: f64, spd: f64) -> Player {
        Player::new(
            id,
            PlayerStats {
                pa: Some(pa),
                h: Some(h),
                so: Some(so),
                xbh: Some(xbh),
                spd: Some(spd),
                ..PlayerStats::default()
            },
        )
    }

    #[test]
    fn picks_best_available_per_slot() {
        let players = vec![
            // Slugger: top power, weak everywhere else.
            player(1, 10.0, 2.0, 5.0, 4.0, 1.0),
            // Table setter: top on-base and speed.
            player(2, 10.0, 7.0, 1.0, 0.0, 10.0),
            player(3, 10.0, 4.0, 3.0, 1.0, 5.0),
        ];
        let scored = derive_and_score(&players);
        let (order, _) = search(&scored, 3);
        assert_eq!(scored[order[0]].player.id.to_string(), "2");
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn score_tie_goes_to_higher_obr() {
        use crate::normalize::NormalizedMetrics;
        use crate::scoring::PlayerScores;
        use crate::slots::score_slots;

        let players = vec![Player::new(1, PlayerStats::default()), Player::new(2, PlayerStats::default())];
        // Both score exactly 0.35 at leadoff: one on speed alone, one on OBR alone.
        let speed_only = NormalizedMetrics { obr: 0.0, bip: 0.0, pwr: 0.0, spd: 1.0 };
        let obr_only = NormalizedMetrics { obr: 0.7, bip: 0.0, pwr: 0.0, spd: 0.0 };
        let pool: Vec<PlayerScores<'_>> = players
            .iter()
            .zip([speed_only, obr_only])
            .map(|(player, normalized)| PlayerScores {
                player,
                raw: Default::default(),
                normalized,
                slots: score_slots(&normalized),
            })
            .collect();
        assert_eq!(pool[0].slots.for_position(0), pool[1].slots.for_position(0));

        let (order, _) = search(&pool, 1);
        assert_eq!(order, vec![1]);
    }

    #[test]
    fn full_tie_keeps_pool_order() {
        let players: Vec<Player> = (1..=4).map(|i| player(i, 10.0, 3.0, 2.0, 1.0, 5.0)).collect();
        let scored = derive_and_score(&players);
        let (order, _) = search(&scored, 3);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn no_duplicates_and_clamped_length() {
        let players: Vec<Player> = (1..=5)
            .map(|i| player(i, 10.0, i as f64, (6 - i) as f64, (i % 3) as f64, i as f64))
            .collect();
        let scored = derive_and_score(&players);
        let (order, objective) = search(&scored, 9);
        assert_eq!(order.len(), 5);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
        assert!(objective.is_finite());
    }
}
