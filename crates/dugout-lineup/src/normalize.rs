// Pool-relative rescaling of rate metrics into [0, 1].
//
// Normalized values are only comparable within one pool: the same player can
// land on different values when the surrounding roster changes.

use crate::metrics::{RawMetrics, SPEED_MAX};

/// Floor for the min-max denominator, so a degenerate pool (all values equal)
/// maps to 0 instead of NaN.
pub const RANGE_EPSILON: f64 = 1e-9;

/// Rate metrics rescaled across the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedMetrics {
    pub obr: f64,
    pub bip: f64,
    pub pwr: f64,
    pub spd: f64,
}

/// Min-max normalization: `(v - min) / max(RANGE_EPSILON, max - min)`,
/// preserving input order. Empty input yields empty output.
pub fn normalize_min_max(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = (max - min).max(RANGE_EPSILON);
    values.iter().map(|v| (v - min) / range).collect()
}

/// Fixed-range normalization for the bounded speed rating.
pub fn normalize_speed(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v / SPEED_MAX).collect()
}

/// Normalize every dimension of a pool of raw metrics, preserving order.
pub fn normalize_pool(raw: &[RawMetrics]) -> Vec<NormalizedMetrics> {
    let obr = normalize_min_max(&raw.iter().map(|m| m.obr).collect::<Vec<_>>());
    let bip = normalize_min_max(&raw.iter().map(|m| m.bip).collect::<Vec<_>>());
    let pwr = normalize_min_max(&raw.iter().map(|m| m.pwr).collect::<Vec<_>>());
    let spd = normalize_speed(&raw.iter().map(|m| m.spd).collect::<Vec<_>>());

    (0..raw.len())
        .map(|i| NormalizedMetrics {
            obr: obr[i],
            bip: bip[i],
            pwr: pwr[i],
            spd: spd[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn min_max_known_values() {
        let out = normalize_min_max(&[0.2, 0.6, 0.4]);
        assert!(approx_eq(out[0], 0.0, 1e-12));
        assert!(approx_eq(out[1], 1.0, 1e-12));
        assert!(approx_eq(out[2], 0.5, 1e-12));
    }

    #[test]
    fn min_max_single_value_is_zero() {
        assert_eq!(normalize_min_max(&[0.37]), vec![0.0]);
    }

    #[test]
    fn min_max_degenerate_pool_is_zero() {
        let out = normalize_min_max(&[0.5; 6]);
        assert!(out.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn min_max_empty() {
        assert!(normalize_min_max(&[]).is_empty());
        assert!(normalize_speed(&[]).is_empty());
    }

    #[test]
    fn min_max_handles_negative_inputs() {
        let out = normalize_min_max(&[-1.0, 1.0, 0.0]);
        assert!(approx_eq(out[0], 0.0, 1e-12));
        assert!(approx_eq(out[1], 1.0, 1e-12));
        assert!(approx_eq(out[2], 0.5, 1e-12));
    }

    #[test]
    fn speed_divides_by_scale() {
        let out = normalize_speed(&[0.0, 5.0, 10.0]);
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn pool_normalization_stays_in_unit_interval() {
        let raw = vec![
            RawMetrics { obr: 0.7, bip: 0.9, pwr: 0.1, spd: 8.0 },
            RawMetrics { obr: 0.3, bip: 0.5, pwr: 0.0, spd: 3.0 },
            RawMetrics { obr: 0.5, bip: 0.8, pwr: 0.2, spd: 5.0 },
        ];
        let norm = normalize_pool(&raw);
        assert_eq!(norm.len(), 3);
        for n in &norm {
            for v in [n.obr, n.bip, n.pwr, n.spd] {
                assert!((0.0..=1.0).contains(&v), "{v} outside [0,1]");
            }
        }
        assert!(approx_eq(norm[0].obr, 1.0, 1e-12));
        assert!(approx_eq(norm[1].obr, 0.0, 1e-12));
        assert!(approx_eq(norm[2].pwr, 1.0, 1e-12));
        assert!(approx_eq(norm[0].spd, 0.8, 1e-12));
    }
}
