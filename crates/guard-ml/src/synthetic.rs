//! Synthetic bootstrap data for the audit risk classifier
//!
//! Placeholder training set used when no persisted model artifacts exist.
//! Three risk tiers over four features, 100 samples per tier, fixed seed so
//! the bootstrap is reproducible. A real trained model can replace the
//! artifacts without touching the feature-vector contract.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Samples generated per risk tier
pub const SAMPLES_PER_TIER: usize = 100;

/// Fixed seed for the synthetic bootstrap
pub const BOOTSTRAP_SEED: u64 = 42;

/// Feature dimension: [missing_controls, cia_imbalance, weak_freq, coverage_pct]
pub const FEATURE_DIM: usize = 4;

/// Generate the synthetic training set, shuffled.
///
/// Tier ranges (per feature, low..high):
/// - Low risk:    few missing controls, balanced CIA, high coverage
/// - Medium risk: moderate gaps across the board
/// - High risk:   many missing controls, heavy imbalance, low coverage
pub fn training_data() -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(BOOTSTRAP_SEED);

    let tiers: [([f64; FEATURE_DIM], [f64; FEATURE_DIM]); 3] = [
        ([0.0, 0.0, 0.0, 80.0], [5.0, 20.0, 5.0, 100.0]),
        ([5.0, 20.0, 5.0, 50.0], [15.0, 50.0, 15.0, 80.0]),
        ([15.0, 50.0, 15.0, 0.0], [50.0, 100.0, 50.0, 50.0]),
    ];

    let mut rows: Vec<(Vec<f64>, usize)> = Vec::with_capacity(3 * SAMPLES_PER_TIER);
    for (class, (lo, hi)) in tiers.iter().enumerate() {
        for _ in 0..SAMPLES_PER_TIER {
            let row: Vec<f64> = (0..FEATURE_DIM)
                .map(|j| rng.gen_range(lo[j]..hi[j]))
                .collect();
            rows.push((row, class));
        }
    }

    rows.shuffle(&mut rng);
    rows.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_ranges() {
        let (x, y) = training_data();
        assert_eq!(x.len(), 3 * SAMPLES_PER_TIER);
        assert_eq!(y.len(), x.len());
        assert!(x.iter().all(|r| r.len() == FEATURE_DIM));

        for (row, class) in x.iter().zip(y.iter()) {
            match class {
                0 => assert!(row[3] >= 80.0),
                2 => assert!(row[3] < 50.0),
                _ => {}
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let (a, _) = training_data();
        let (b, _) = training_data();
        assert_eq!(a, b);
    }
}
