//! Pipeline orchestration
//!
//! Runs the three analysis layers per framework, the document-level CIA
//! analysis once, fuses the scores into the Compliance Confidence Index,
//! and feeds the aggregate metrics to the audit risk predictor. The
//! pipeline owns no mutable state; concurrent runs share it behind an
//! `Arc`.

use std::collections::BTreeMap;
use std::sync::Arc;

use guard_ml::{EmbeddingBackend, RiskModelConfig};
use uuid::Uuid;

use crate::audit::{AuditRiskPredictor, RiskMetrics};
use crate::catalog::FrameworkCatalog;
use crate::cia::CiaValidator;
use crate::llm::{LlmBackend, LlmConfig};
use crate::reasoning::ReasoningEngine;
use crate::report::{CciReport, FrameworkCompliance, HybridAnalysis};
use crate::semantic::{ComplianceLevel, SemanticEngine};
use crate::structural::StructuralEngine;
use crate::{round2, Clause};

const STRUCTURAL_WEIGHT: f64 = 0.4;
const SEMANTIC_WEIGHT: f64 = 0.4;
const REASONING_WEIGHT: f64 = 0.2;

/// Default framework when a request names none
const DEFAULT_FRAMEWORK: &str = "iso27001";

/// Balance index fed to the risk model when CIA analysis is absent or empty
const DEFAULT_BALANCE_INDEX: f64 = 50.0;

/// One analysis request
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Document name carried into the report
    pub file_name: String,
    /// Full document text; derived from the clauses when `None`
    pub full_text: Option<String>,
    /// Extracted clauses
    pub clauses: Vec<Clause>,
    /// Framework keys to analyze; defaults to ISO 27001 when empty
    pub frameworks: Vec<String>,
    /// Whether to run the CIA analysis
    pub include_cia: bool,
}

/// The 3-layer hybrid analysis pipeline.
///
/// Build once with the backends the deployment has, then `run` per
/// document.
pub struct HybridPipeline {
    structural: StructuralEngine,
    semantic: SemanticEngine,
    reasoning: ReasoningEngine,
    cia: CiaValidator,
    audit: AuditRiskPredictor,
}

impl HybridPipeline {
    /// Assemble the pipeline from its injected parts
    pub fn new(
        catalog: Arc<FrameworkCatalog>,
        embedding: Option<Arc<dyn EmbeddingBackend>>,
        llm: Option<Arc<dyn LlmBackend>>,
        llm_config: LlmConfig,
        risk_config: &RiskModelConfig,
    ) -> Self {
        Self {
            structural: StructuralEngine::new(Arc::clone(&catalog)),
            semantic: SemanticEngine::new(catalog, embedding),
            reasoning: ReasoningEngine::new(llm, llm_config),
            cia: CiaValidator::new(),
            audit: AuditRiskPredictor::new(risk_config),
        }
    }

    /// Execute the full hybrid analysis for one document.
    ///
    /// Always completes: unknown frameworks produce zero-valued layer
    /// results and unavailable backends activate their fallbacks.
    pub async fn run(&self, request: AnalysisRequest) -> CciReport {
        let frameworks = if request.frameworks.is_empty() {
            vec![DEFAULT_FRAMEWORK.to_string()]
        } else {
            request.frameworks.clone()
        };

        let clauses = &request.clauses;
        let full_text = request.full_text.clone().unwrap_or_else(|| {
            clauses
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });

        tracing::info!(
            file = %request.file_name,
            clauses = clauses.len(),
            frameworks = ?frameworks,
            "starting hybrid analysis"
        );

        let cia_analysis = request
            .include_cia
            .then(|| self.cia.analyze_document(clauses));

        let mut layer1 = BTreeMap::new();
        let mut layer2 = BTreeMap::new();
        let mut layer3 = BTreeMap::new();
        let mut cci_scores = BTreeMap::new();

        for fw in &frameworks {
            let l1 = self.structural.analyze(&full_text, clauses, fw);
            let l2 = self.semantic.analyze(clauses, fw);
            let l3 = self
                .reasoning
                .analyze(&l1, &l2, cia_analysis.as_ref(), fw)
                .await;

            let cci = compute_cci(l1.structural_score, l2.semantic_score, l3.reasoning_confidence);
            tracing::info!(
                framework = %fw,
                structural = l1.structural_score,
                semantic = l2.semantic_score,
                reasoning = l3.reasoning_confidence,
                cci,
                "framework analysis complete"
            );

            layer1.insert(fw.clone(), l1);
            layer2.insert(fw.clone(), l2);
            layer3.insert(fw.clone(), l3);
            cci_scores.insert(fw.clone(), cci);
        }

        // Risk prediction keys off the primary (first-requested) framework
        let primary = &frameworks[0];
        let primary_semantic = &layer2[primary];
        let balance_index = cia_analysis
            .as_ref()
            .filter(|c| c.total_clauses > 0)
            .map(|c| c.cia_balance_index)
            .unwrap_or(DEFAULT_BALANCE_INDEX);
        let metrics = RiskMetrics {
            missing_controls_count: primary_semantic
                .total_controls
                .saturating_sub(primary_semantic.matched_controls),
            cia_balance_index: balance_index,
            weak_clauses_count: primary_semantic
                .clause_matches
                .iter()
                .filter(|m| m.compliance_level == ComplianceLevel::Weak)
                .count(),
            total_clauses: clauses.len(),
            compliance_percentage: primary_semantic.compliance_percentage,
        };
        let risk_prediction = self.audit.predict_risk(&metrics);
        let audit_readiness = self.audit.audit_readiness(&risk_prediction);

        let compliance_results: BTreeMap<String, FrameworkCompliance> = layer2
            .iter()
            .map(|(fw, l2)| (fw.clone(), FrameworkCompliance::from_semantic(l2)))
            .collect();

        let overall_cci = if cci_scores.is_empty() {
            0.0
        } else {
            round2(cci_scores.values().sum::<f64>() / cci_scores.len() as f64)
        };

        CciReport {
            analysis_id: Uuid::new_v4().to_string(),
            file_name: request.file_name,
            frameworks,
            compliance_results,
            cia_analysis,
            risk_prediction,
            audit_readiness,
            hybrid_analysis: HybridAnalysis {
                layer1_structural: layer1,
                layer2_semantic: layer2,
                layer3_reasoning: layer3,
                cci_scores,
                overall_cci,
            },
            analyzed_at: chrono::Utc::now(),
        }
    }
}

/// Compliance Confidence Index:
/// structural x 0.4 + semantic x 0.4 + reasoning x 0.2, rounded to 2dp
pub fn compute_cci(structural: f64, semantic: f64, reasoning: f64) -> f64 {
    round2(
        structural * STRUCTURAL_WEIGHT + semantic * SEMANTIC_WEIGHT + reasoning * REASONING_WEIGHT,
    )
}
