//! Bagged decision-tree ensemble for audit risk classification

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Risk classes: 0 = Low, 1 = Medium, 2 = High
pub const NUM_CLASSES: usize = 3;

const MAX_DEPTH: usize = 3;
const MIN_SPLIT: usize = 4;

/// One node of a CART tree
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        probs: [f64; NUM_CLASSES],
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> [f64; NUM_CLASSES] {
        match self {
            Node::Leaf { probs } => *probs,
            Node::Split { feature, threshold, left, right } => {
                if row.get(*feature).copied().unwrap_or(0.0) <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Bagged ensemble of shallow CART trees.
///
/// Stands in for the pretrained classifier contract: given a standardized
/// feature row it returns a class index and a probability triple summing
/// to 1. Serializable so a trained forest persists as a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskForest {
    trees: Vec<Node>,
    feature_dim: usize,
}

impl RiskForest {
    /// Train on `(rows, labels)` with bootstrap sampling.
    pub fn train(x: &[Vec<f64>], y: &[usize], n_trees: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let feature_dim = x.first().map(|r| r.len()).unwrap_or(0);
        let n = x.len();

        let trees = (0..n_trees)
            .map(|_| {
                let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                build_tree(x, y, &indices, 0, feature_dim, &mut rng)
            })
            .collect();

        Self { trees, feature_dim }
    }

    /// Class probabilities for one standardized feature row
    pub fn predict_proba(&self, row: &[f64]) -> [f64; NUM_CLASSES] {
        if self.trees.is_empty() {
            return [1.0 / NUM_CLASSES as f64; NUM_CLASSES];
        }
        let mut acc = [0.0; NUM_CLASSES];
        for tree in &self.trees {
            let p = tree.predict(row);
            for (a, v) in acc.iter_mut().zip(p.iter()) {
                *a += v;
            }
        }
        let n = self.trees.len() as f64;
        for a in &mut acc {
            *a /= n;
        }
        acc
    }

    /// Argmax class for one standardized feature row
    pub fn predict(&self, row: &[f64]) -> usize {
        let probs = self.predict_proba(row);
        probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Feature dimension the forest was trained on
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }
}

fn class_counts(y: &[usize], indices: &[usize]) -> [usize; NUM_CLASSES] {
    let mut counts = [0usize; NUM_CLASSES];
    for &i in indices {
        if let Some(&c) = y.get(i) {
            if c < NUM_CLASSES {
                counts[c] += 1;
            }
        }
    }
    counts
}

fn leaf_from(y: &[usize], indices: &[usize]) -> Node {
    let counts = class_counts(y, indices);
    let total = counts.iter().sum::<usize>().max(1) as f64;
    let mut probs = [0.0; NUM_CLASSES];
    for (p, &c) in probs.iter_mut().zip(counts.iter()) {
        *p = c as f64 / total;
    }
    Node::Leaf { probs }
}

fn gini(counts: &[usize; NUM_CLASSES]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn build_tree(
    x: &[Vec<f64>],
    y: &[usize],
    indices: &[usize],
    depth: usize,
    feature_dim: usize,
    rng: &mut StdRng,
) -> Node {
    let counts = class_counts(y, indices);
    let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if depth >= MAX_DEPTH || indices.len() < MIN_SPLIT || pure || feature_dim == 0 {
        return leaf_from(y, indices);
    }

    // Random feature subset, roughly sqrt(dim)
    let n_try = ((feature_dim as f64).sqrt().ceil() as usize).max(1);
    let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, impurity)

    for _ in 0..n_try {
        let feature = rng.gen_range(0..feature_dim);
        let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.dedup();
        if values.len() < 2 {
            continue;
        }

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let mut left = [0usize; NUM_CLASSES];
            let mut right = [0usize; NUM_CLASSES];
            for &i in indices {
                let Some(&c) = y.get(i) else { continue };
                if c >= NUM_CLASSES {
                    continue;
                }
                let target = if x[i][feature] <= threshold { &mut left } else { &mut right };
                target[c] += 1;
            }
            let nl = left.iter().sum::<usize>() as f64;
            let nr = right.iter().sum::<usize>() as f64;
            if nl == 0.0 || nr == 0.0 {
                continue;
            }
            let impurity = (nl * gini(&left) + nr * gini(&right)) / (nl + nr);
            if best.map(|(_, _, b)| impurity < b).unwrap_or(true) {
                best = Some((feature, threshold, impurity));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        return leaf_from(y, indices);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
        indices.iter().partition(|&&i| x[i][feature] <= threshold);
    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf_from(y, indices);
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_tree(x, y, &left_idx, depth + 1, feature_dim, rng)),
        right: Box::new(build_tree(x, y, &right_idx, depth + 1, feature_dim, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..30 {
            let offset = (i % 10) as f64 * 0.01;
            x.push(vec![0.0 + offset, 0.0]);
            y.push(0);
            x.push(vec![5.0 + offset, 5.0]);
            y.push(1);
            x.push(vec![10.0 + offset, 10.0]);
            y.push(2);
        }
        (x, y)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (x, y) = separable_data();
        let forest = RiskForest::train(&x, &y, 15, 7);
        let probs = forest.predict_proba(&[5.0, 5.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_separable_classes() {
        let (x, y) = separable_data();
        let forest = RiskForest::train(&x, &y, 25, 42);

        assert_eq!(forest.predict(&[0.1, 0.1]), 0);
        assert_eq!(forest.predict(&[10.0, 10.0]), 2);
        assert_eq!(forest.feature_dim(), 2);
    }

    #[test]
    fn test_out_of_range_labels_ignored() {
        let (mut x, mut y) = separable_data();
        x.push(vec![5.0, 5.0]);
        y.push(7);

        let forest = RiskForest::train(&x, &y, 25, 42);
        assert_eq!(forest.predict(&[0.1, 0.1]), 0);

        let probs = forest.predict_proba(&[10.0, 10.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_forest_uniform() {
        let forest = RiskForest { trees: Vec::new(), feature_dim: 4 };
        let probs = forest.predict_proba(&[1.0, 2.0, 3.0, 4.0]);
        assert!(probs.iter().all(|p| (p - 1.0 / 3.0).abs() < 1e-9));
    }
}
