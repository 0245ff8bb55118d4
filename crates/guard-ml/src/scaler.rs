//! Feature standardization with stored fit parameters

use serde::{Deserialize, Serialize};

/// Standardizes features to zero mean / unit variance.
///
/// Fit parameters are stored so the scaler can be persisted next to the
/// trained classifier and reloaded without refitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit per-column mean and population standard deviation.
    ///
    /// All rows must share the same dimension. Columns with near-zero
    /// variance get a std floor so transform never divides by zero.
    pub fn fit(samples: &[Vec<f64>]) -> Self {
        let dim = samples.first().map(|r| r.len()).unwrap_or(0);
        let n = samples.len().max(1) as f64;

        let mut means = vec![0.0; dim];
        for row in samples {
            for (j, v) in row.iter().enumerate() {
                means[j] += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; dim];
        for row in samples {
            for (j, v) in row.iter().enumerate() {
                stds[j] += (v - means[j]).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt().max(1e-9);
        }

        Self { means, stds }
    }

    /// Standardize a single feature row
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(j, v)| (v - self.means.get(j).copied().unwrap_or(0.0)) / self.stds.get(j).copied().unwrap_or(1.0))
            .collect()
    }

    /// Fit and standardize the full sample set
    pub fn fit_transform(samples: &[Vec<f64>]) -> (Self, Vec<Vec<f64>>) {
        let scaler = Self::fit(samples);
        let scaled = samples.iter().map(|r| scaler.transform(r)).collect();
        (scaler, scaled)
    }

    /// Feature dimension this scaler was fit on
    pub fn dim(&self) -> usize {
        self.means.len()
    }
}
