//! Final analysis report
//!
//! One `CciReport` per pipeline run: per-framework layer outputs, fused CCI
//! scores, CIA analysis, risk prediction and readiness, plus a compact
//! per-framework compliance summary for consumers that only need the
//! headline numbers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditReadiness, RiskPrediction};
use crate::cia::CiaResult;
use crate::reasoning::ReasoningResult;
use crate::semantic::{MissingControl, SemanticResult};
use crate::structural::StructuralResult;

/// A clause flagged weak in the compliance summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakClause {
    /// Truncated clause text
    pub clause: String,
    /// Why the clause was flagged
    pub reason: String,
}

/// Compact per-framework compliance summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkCompliance {
    /// Percentage of catalog controls covered
    pub compliance_percentage: f64,
    /// Controls with semantic coverage
    pub matched_controls_count: usize,
    /// Controls in the framework catalog
    pub total_controls: usize,
    /// Clauses analyzed
    pub total_clauses: usize,
    /// Clauses with strong or partial matches
    pub matched_clauses: usize,
    /// Uncovered controls, capped at 10
    pub missing_controls: Vec<MissingControl>,
    /// Weakest clauses, capped at 5
    pub weak_clauses: Vec<WeakClause>,
}

impl FrameworkCompliance {
    /// Summarize a Layer 2 result
    pub fn from_semantic(semantic: &SemanticResult) -> Self {
        let missing_controls = semantic.missing_controls.iter().take(10).cloned().collect();
        let weak_clauses = semantic
            .clause_matches
            .iter()
            .filter(|m| m.compliance_level == crate::semantic::ComplianceLevel::Weak)
            .take(5)
            .map(|m| WeakClause {
                clause: m.clause_text.clone(),
                reason: format!("Low similarity ({:.2})", m.similarity),
            })
            .collect();

        Self {
            compliance_percentage: semantic.compliance_percentage,
            matched_controls_count: semantic.matched_controls,
            total_controls: semantic.total_controls,
            total_clauses: semantic.total_clauses,
            matched_clauses: semantic.strong_count + semantic.partial_count,
            missing_controls,
            weak_clauses,
        }
    }
}

/// Per-framework layer outputs and fused confidence scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridAnalysis {
    /// Layer 1 results keyed by framework
    pub layer1_structural: BTreeMap<String, StructuralResult>,
    /// Layer 2 results keyed by framework
    pub layer2_semantic: BTreeMap<String, SemanticResult>,
    /// Layer 3 results keyed by framework
    pub layer3_reasoning: BTreeMap<String, ReasoningResult>,
    /// CCI per framework
    pub cci_scores: BTreeMap<String, f64>,
    /// Mean CCI across frameworks (0 when none)
    pub overall_cci: f64,
}

/// Complete output of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CciReport {
    /// Unique id for this analysis
    pub analysis_id: String,
    /// Name of the analyzed document
    pub file_name: String,
    /// Framework keys analyzed, in request order
    pub frameworks: Vec<String>,
    /// Compact summaries keyed by framework
    pub compliance_results: BTreeMap<String, FrameworkCompliance>,
    /// Document-level CIA analysis, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cia_analysis: Option<CiaResult>,
    /// Audit risk prediction (primary framework)
    pub risk_prediction: RiskPrediction,
    /// Audit readiness derived from the risk prediction
    pub audit_readiness: AuditReadiness,
    /// Full layer outputs and CCI fusion
    pub hybrid_analysis: HybridAnalysis,
    /// UTC completion timestamp
    pub analyzed_at: DateTime<Utc>,
}

impl CciReport {
    /// CCI for one framework, if analyzed
    pub fn cci(&self, framework: &str) -> Option<f64> {
        self.hybrid_analysis.cci_scores.get(framework).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{ClauseMatch, ComplianceLevel};

    #[test]
    fn test_framework_compliance_summary() {
        let mut semantic = SemanticResult::empty("iso27001", &[]);
        semantic.total_clauses = 3;
        semantic.strong_count = 1;
        semantic.partial_count = 1;
        semantic.weak_count = 1;
        semantic.clause_matches = vec![
            ClauseMatch {
                clause_text: "strong clause".to_string(),
                best_control_id: "A.9.1".to_string(),
                best_control_title: "Access Control Policy".to_string(),
                similarity: 0.91,
                compliance_level: ComplianceLevel::Strong,
            },
            ClauseMatch {
                clause_text: "vague clause".to_string(),
                best_control_id: "A.12.3".to_string(),
                best_control_title: "Information Backup".to_string(),
                similarity: 0.31,
                compliance_level: ComplianceLevel::Weak,
            },
        ];

        let summary = FrameworkCompliance::from_semantic(&semantic);
        assert_eq!(summary.matched_clauses, 2);
        assert_eq!(summary.weak_clauses.len(), 1);
        assert_eq!(summary.weak_clauses[0].reason, "Low similarity (0.31)");
    }
}
