//! ML primitives for the ComplianceGuard hybrid pipeline
//!
//! # Features
//!
//! - Feature vectors with cosine similarity (semantic clause matching)
//! - Standard scaler with persisted fit parameters
//! - Bagged decision-tree ensemble for 3-class audit risk prediction
//! - Synthetic bootstrap data for first-run model initialization
//! - Embedding backend seam and per-framework embedding cache

#![warn(missing_docs)]

pub mod classifier;
pub mod embedding;
pub mod features;
pub mod scaler;
pub mod synthetic;

use std::path::PathBuf;

use thiserror::Error;

pub use classifier::{RiskForest, NUM_CLASSES};
pub use embedding::{EmbeddingBackend, EmbeddingCache};
pub use features::FeatureVector;
pub use scaler::StandardScaler;

/// ML error types
#[derive(Debug, Error)]
pub enum MlError {
    /// Artifact I/O failure
    #[error("artifact IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact parse failure
    #[error("artifact parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Feature row does not match the trained dimension
    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// trained dimension
        expected: usize,
        /// supplied dimension
        got: usize,
    },
}

/// Risk model configuration
#[derive(Debug, Clone)]
pub struct RiskModelConfig {
    /// Path to the persisted forest artifact (JSON)
    pub model_path: Option<PathBuf>,
    /// Path to the persisted scaler artifact (JSON)
    pub scaler_path: Option<PathBuf>,
    /// Trees trained during a synthetic bootstrap
    pub n_trees: usize,
    /// Seed for bootstrap training
    pub seed: u64,
}

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            scaler_path: None,
            n_trees: 30,
            seed: synthetic::BOOTSTRAP_SEED,
        }
    }
}

/// Classifier output
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Predicted class index (0 = Low, 1 = Medium, 2 = High)
    pub class: usize,
    /// Probability of the predicted class (0.0 - 1.0)
    pub confidence: f64,
    /// Probability per class, sums to 1
    pub probabilities: [f64; NUM_CLASSES],
}

/// Scaler + forest pair backing the audit risk predictor
pub struct RiskModel {
    scaler: StandardScaler,
    forest: RiskForest,
}

impl RiskModel {
    /// Load persisted artifacts, or bootstrap from synthetic data.
    ///
    /// Loading requires both paths to be set and both files to parse; any
    /// failure falls through to the bootstrap. Bootstrap results are
    /// persisted best-effort for reuse (a persist failure is logged, not
    /// fatal).
    pub fn load_or_bootstrap(config: &RiskModelConfig) -> Self {
        if let (Some(model_path), Some(scaler_path)) = (&config.model_path, &config.scaler_path) {
            match Self::load(model_path, scaler_path) {
                Ok(model) => {
                    tracing::info!(model = %model_path.display(), "risk model loaded");
                    return model;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load risk model, bootstrapping");
                }
            }
        }

        let model = Self::bootstrap(config);
        if let Err(e) = model.persist(config) {
            tracing::warn!(error = %e, "failed to persist bootstrapped risk model");
        }
        model
    }

    /// Train from the synthetic tiers
    pub fn bootstrap(config: &RiskModelConfig) -> Self {
        tracing::info!("bootstrapping audit risk model from synthetic data");
        let (x, y) = synthetic::training_data();
        let (scaler, scaled) = StandardScaler::fit_transform(&x);
        let forest = RiskForest::train(&scaled, &y, config.n_trees, config.seed);
        Self { scaler, forest }
    }

    fn load(model_path: &PathBuf, scaler_path: &PathBuf) -> Result<Self, MlError> {
        let forest: RiskForest = serde_json::from_str(&std::fs::read_to_string(model_path)?)?;
        let scaler: StandardScaler = serde_json::from_str(&std::fs::read_to_string(scaler_path)?)?;
        Ok(Self { scaler, forest })
    }

    /// Write both artifacts when paths are configured
    pub fn persist(&self, config: &RiskModelConfig) -> Result<(), MlError> {
        if let (Some(model_path), Some(scaler_path)) = (&config.model_path, &config.scaler_path) {
            if let Some(parent) = model_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            if let Some(parent) = scaler_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(model_path, serde_json::to_string(&self.forest)?)?;
            std::fs::write(scaler_path, serde_json::to_string(&self.scaler)?)?;
            tracing::info!(model = %model_path.display(), "risk model persisted");
        }
        Ok(())
    }

    /// Standardize a raw feature row and classify it
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, MlError> {
        if features.len() != self.scaler.dim() {
            return Err(MlError::DimensionMismatch {
                expected: self.scaler.dim(),
                got: features.len(),
            });
        }

        let scaled = self.scaler.transform(features);
        let probabilities = self.forest.predict_proba(&scaled);
        let class = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);

        Ok(Prediction {
            class,
            confidence: probabilities[class],
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_predicts_tiers() {
        let model = RiskModel::bootstrap(&RiskModelConfig::default());

        // Deep inside the low-risk tier
        let low = model.predict(&[1.0, 5.0, 2.0, 95.0]).unwrap();
        assert_eq!(low.class, 0);
        assert!(low.confidence > 0.5);

        // Deep inside the high-risk tier
        let high = model.predict(&[40.0, 90.0, 40.0, 10.0]).unwrap();
        assert_eq!(high.class, 2);

        let sum: f64 = high.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = RiskModel::bootstrap(&RiskModelConfig::default());
        assert!(matches!(
            model.predict(&[1.0, 2.0]),
            Err(MlError::DimensionMismatch { expected: 4, got: 2 })
        ));
    }

    #[test]
    fn test_persist_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = RiskModelConfig {
            model_path: Some(dir.path().join("audit_forest.json")),
            scaler_path: Some(dir.path().join("audit_scaler.json")),
            ..Default::default()
        };

        let first = RiskModel::load_or_bootstrap(&config);
        let reloaded = RiskModel::load_or_bootstrap(&config);

        let row = [3.0, 10.0, 2.0, 90.0];
        let a = first.predict(&row).unwrap();
        let b = reloaded.predict(&row).unwrap();
        assert_eq!(a.class, b.class);
        assert_eq!(a.probabilities, b.probabilities);
    }
}
