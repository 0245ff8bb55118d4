//! Audit risk prediction and readiness scoring
//!
//! Wraps the risk model from `guard_ml` behind a compliance-domain API:
//! pipeline metrics in, risk tier with probability distribution and
//! recommendations out. A predictor whose model failed to initialize still
//! answers, with the `Unknown` level, so an analysis never aborts on a
//! model problem.

use serde::{Deserialize, Serialize};

use guard_ml::{RiskModel, RiskModelConfig};

use crate::round2;

/// Aggregated pipeline metrics the risk model consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Controls without semantic coverage
    pub missing_controls_count: usize,
    /// CIA Balance Index (0-100)
    pub cia_balance_index: f64,
    /// Clauses with only weak semantic matches
    pub weak_clauses_count: usize,
    /// Total clauses analyzed
    pub total_clauses: usize,
    /// Semantic compliance percentage (0-100)
    pub compliance_percentage: f64,
}

impl RiskMetrics {
    /// Raw model features:
    /// [missing controls, CIA imbalance, weak statements per 100 clauses, coverage %]
    pub fn features(&self) -> [f64; 4] {
        let total = self.total_clauses.max(1) as f64;
        [
            self.missing_controls_count as f64,
            100.0 - self.cia_balance_index,
            self.weak_clauses_count as f64 / total * 100.0,
            self.compliance_percentage,
        ]
    }
}

/// Predicted audit risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Class 0
    #[serde(rename = "Low Risk")]
    Low,
    /// Class 1
    #[serde(rename = "Medium Risk")]
    Medium,
    /// Class 2
    #[serde(rename = "High Risk")]
    High,
    /// Model unavailable
    Unknown,
}

impl RiskLevel {
    fn from_class(class: usize) -> Self {
        match class {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Class probabilities as percentages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskDistribution {
    /// P(low risk) x 100
    #[serde(rename = "Low Risk")]
    pub low: f64,
    /// P(medium risk) x 100
    #[serde(rename = "Medium Risk")]
    pub medium: f64,
    /// P(high risk) x 100
    #[serde(rename = "High Risk")]
    pub high: f64,
}

/// Raw feature values echoed back with display names
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureContributions {
    /// Missing controls count
    #[serde(rename = "Missing Controls")]
    pub missing_controls: f64,
    /// 100 minus the CIA Balance Index
    #[serde(rename = "CIA Imbalance")]
    pub cia_imbalance: f64,
    /// Weak statements per 100 clauses
    #[serde(rename = "Weak Statements")]
    pub weak_statements: f64,
    /// Semantic compliance percentage
    #[serde(rename = "Coverage Percentage")]
    pub coverage_percentage: f64,
}

/// Risk prediction output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Predicted tier
    pub risk_level: RiskLevel,
    /// Probability of the predicted tier, as a percentage
    pub confidence: f64,
    /// Class index (0 = Low, 1 = Medium, 2 = High)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    /// Per-tier probabilities
    pub probability_distribution: RiskDistribution,
    /// Feature values that drove the prediction
    pub feature_contributions: FeatureContributions,
    /// Tier-specific remediation guidance
    pub recommendations: Vec<String>,
}

impl RiskPrediction {
    /// Placeholder prediction when no model is available
    pub fn unknown() -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            confidence: 0.0,
            risk_score: None,
            probability_distribution: RiskDistribution::default(),
            feature_contributions: FeatureContributions::default(),
            recommendations: Vec::new(),
        }
    }
}

/// Readiness band derived from the readiness score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    /// Score >= 80
    #[serde(rename = "Audit Ready")]
    AuditReady,
    /// Score >= 60
    #[serde(rename = "Mostly Ready")]
    MostlyReady,
    /// Score >= 40
    Preparing,
    /// Score < 40
    #[serde(rename = "Not Ready")]
    NotReady,
}

/// Audit readiness assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReadiness {
    /// Readiness score, 0-100
    pub audit_readiness_score: f64,
    /// Readiness band
    pub readiness_level: ReadinessLevel,
    /// Band-specific guidance
    pub recommendation: String,
}

/// Audit risk predictor over the persisted (or bootstrapped) risk model
pub struct AuditRiskPredictor {
    model: Option<RiskModel>,
}

impl AuditRiskPredictor {
    /// Load artifacts or bootstrap a fresh model
    pub fn new(config: &RiskModelConfig) -> Self {
        Self {
            model: Some(RiskModel::load_or_bootstrap(config)),
        }
    }

    /// Predictor with no model; every prediction is `Unknown`.
    ///
    /// Used when risk prediction is deliberately disabled.
    pub fn disabled() -> Self {
        Self { model: None }
    }

    /// Predict the audit risk tier from aggregated pipeline metrics
    pub fn predict_risk(&self, metrics: &RiskMetrics) -> RiskPrediction {
        let Some(model) = &self.model else {
            tracing::warn!("risk model unavailable, returning unknown risk");
            return RiskPrediction::unknown();
        };

        let features = metrics.features();
        let prediction = match model.predict(&features) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "risk prediction failed");
                return RiskPrediction::unknown();
            }
        };

        let risk_level = RiskLevel::from_class(prediction.class);
        let contributions = FeatureContributions {
            missing_controls: features[0],
            cia_imbalance: features[1],
            weak_statements: features[2],
            coverage_percentage: features[3],
        };
        let recommendations = risk_recommendations(risk_level, &contributions);

        tracing::debug!(%risk_level, confidence = prediction.confidence, "audit risk predicted");

        RiskPrediction {
            risk_level,
            confidence: round2(prediction.confidence * 100.0),
            risk_score: Some(prediction.class as u8),
            probability_distribution: RiskDistribution {
                low: round2(prediction.probabilities[0] * 100.0),
                medium: round2(prediction.probabilities[1] * 100.0),
                high: round2(prediction.probabilities[2] * 100.0),
            },
            feature_contributions: contributions,
            recommendations,
        }
    }

    /// Readiness score from a risk prediction.
    ///
    /// Score = P(low) + 0.5 x P(medium); high-risk probability contributes
    /// nothing.
    pub fn audit_readiness(&self, prediction: &RiskPrediction) -> AuditReadiness {
        let dist = prediction.probability_distribution;
        let score = round2(dist.low + dist.medium * 0.5);

        let level = if score >= 80.0 {
            ReadinessLevel::AuditReady
        } else if score >= 60.0 {
            ReadinessLevel::MostlyReady
        } else if score >= 40.0 {
            ReadinessLevel::Preparing
        } else {
            ReadinessLevel::NotReady
        };

        AuditReadiness {
            audit_readiness_score: score,
            readiness_level: level,
            recommendation: readiness_recommendation(level).to_string(),
        }
    }
}

fn risk_recommendations(
    level: RiskLevel,
    contributions: &FeatureContributions,
) -> Vec<String> {
    let mut out = Vec::new();
    match level {
        RiskLevel::High => {
            out.push(
                "HIGH RISK: Immediate action required. Address critical gaps before audit."
                    .to_string(),
            );
            if contributions.missing_controls > 15.0 {
                out.push("Implement missing controls as priority".to_string());
            }
            if contributions.cia_imbalance > 50.0 {
                out.push("Balance CIA coverage across all three pillars".to_string());
            }
            if contributions.coverage_percentage < 50.0 {
                out.push("Expand policy documentation to improve coverage".to_string());
            }
        }
        RiskLevel::Medium => {
            out.push("MEDIUM RISK: Improvements needed. Focus on key gaps.".to_string());
            out.push("Review and strengthen weak policy statements".to_string());
            out.push("Address identified control gaps".to_string());
        }
        RiskLevel::Low => {
            out.push("LOW RISK: Good compliance posture. Continue monitoring.".to_string());
            out.push("Maintain current documentation quality".to_string());
            out.push("Conduct regular reviews to ensure ongoing compliance".to_string());
        }
        RiskLevel::Unknown => {}
    }
    out
}

fn readiness_recommendation(level: ReadinessLevel) -> &'static str {
    match level {
        ReadinessLevel::AuditReady => {
            "Your compliance documentation is audit-ready. Maintain current standards."
        }
        ReadinessLevel::MostlyReady => {
            "Address minor gaps and strengthen weak areas before audit."
        }
        ReadinessLevel::Preparing => {
            "Significant work needed. Focus on critical controls and coverage."
        }
        ReadinessLevel::NotReady => {
            "Major gaps identified. Comprehensive remediation required before audit."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> AuditRiskPredictor {
        AuditRiskPredictor::new(&RiskModelConfig::default())
    }

    #[test]
    fn test_feature_extraction() {
        let metrics = RiskMetrics {
            missing_controls_count: 4,
            cia_balance_index: 70.0,
            weak_clauses_count: 3,
            total_clauses: 20,
            compliance_percentage: 65.0,
        };
        assert_eq!(metrics.features(), [4.0, 30.0, 15.0, 65.0]);
    }

    #[test]
    fn test_zero_clauses_does_not_divide_by_zero() {
        let metrics = RiskMetrics {
            missing_controls_count: 0,
            cia_balance_index: 50.0,
            weak_clauses_count: 0,
            total_clauses: 0,
            compliance_percentage: 0.0,
        };
        let features = metrics.features();
        assert!(features.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn test_strong_document_is_low_risk() {
        let metrics = RiskMetrics {
            missing_controls_count: 1,
            cia_balance_index: 95.0,
            weak_clauses_count: 1,
            total_clauses: 50,
            compliance_percentage: 95.0,
        };
        let prediction = predictor().predict_risk(&metrics);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert_eq!(prediction.risk_score, Some(0));
        assert!(!prediction.recommendations.is_empty());
    }

    #[test]
    fn test_poor_document_is_high_risk() {
        let metrics = RiskMetrics {
            missing_controls_count: 40,
            cia_balance_index: 10.0,
            weak_clauses_count: 40,
            total_clauses: 100,
            compliance_percentage: 10.0,
        };
        let prediction = predictor().predict_risk(&metrics);
        assert_eq!(prediction.risk_level, RiskLevel::High);
        // High missing-control count triggers the dedicated recommendation
        assert!(prediction
            .recommendations
            .iter()
            .any(|r| r.contains("missing controls")));
    }

    #[test]
    fn test_distribution_sums_to_100() {
        let metrics = RiskMetrics {
            missing_controls_count: 10,
            cia_balance_index: 60.0,
            weak_clauses_count: 10,
            total_clauses: 80,
            compliance_percentage: 60.0,
        };
        let prediction = predictor().predict_risk(&metrics);
        let dist = prediction.probability_distribution;
        assert!((dist.low + dist.medium + dist.high - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_disabled_predictor_returns_unknown() {
        let prediction = AuditRiskPredictor::disabled().predict_risk(&RiskMetrics {
            missing_controls_count: 0,
            cia_balance_index: 50.0,
            weak_clauses_count: 0,
            total_clauses: 1,
            compliance_percentage: 50.0,
        });
        assert_eq!(prediction.risk_level, RiskLevel::Unknown);
        assert_eq!(prediction.risk_score, None);
    }

    #[test]
    fn test_readiness_bands() {
        let predictor = AuditRiskPredictor::disabled();
        let mut prediction = RiskPrediction::unknown();

        prediction.probability_distribution = RiskDistribution {
            low: 80.0,
            medium: 20.0,
            high: 0.0,
        };
        let readiness = predictor.audit_readiness(&prediction);
        assert_eq!(readiness.audit_readiness_score, 90.0);
        assert_eq!(readiness.readiness_level, ReadinessLevel::AuditReady);

        prediction.probability_distribution = RiskDistribution {
            low: 10.0,
            medium: 20.0,
            high: 70.0,
        };
        let readiness = predictor.audit_readiness(&prediction);
        assert_eq!(readiness.audit_readiness_score, 20.0);
        assert_eq!(readiness.readiness_level, ReadinessLevel::NotReady);
    }

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Low).unwrap(),
            "\"Low Risk\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLevel::Unknown).unwrap(),
            "\"Unknown\""
        );
    }
}
