//! ComplianceGuard Hybrid Compliance Pipeline
//!
//! Assesses compliance documents against regulatory frameworks (ISO 27001,
//! ISO 9001, NIST CSF, GDPR) by fusing three analysis layers into a single
//! Compliance Confidence Index (CCI).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     HYBRID COMPLIANCE PIPELINE                   │
//! │                                                                  │
//! │  Clauses ──► Layer 1: Structural Rules ──┐                       │
//! │         ──► Layer 2: Semantic Matching ──┼──► Layer 3: Reasoning │
//! │         ──► CIA Validation ──────────────┘          │            │
//! │                     │                               ▼            │
//! │                     └──► Audit Risk Prediction ──► CCI Report    │
//! │                                                                  │
//! │  CCI = Structural × 0.4 + Semantic × 0.4 + Reasoning × 0.2       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every layer degrades gracefully: a missing embedding model falls back to
//! keyword overlap, an unreachable LLM falls back to rule-based narrative,
//! and absent risk-model artifacts trigger a synthetic bootstrap. Analyses
//! always complete.

#![warn(missing_docs)]

pub mod audit;
pub mod catalog;
pub mod cia;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod reasoning;
pub mod semantic;
pub mod structural;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use audit::{AuditReadiness, AuditRiskPredictor, RiskLevel, RiskMetrics, RiskPrediction};
pub use catalog::{CiaPillar, Control, Framework, FrameworkCatalog, Priority, RequiredSection};
pub use cia::{CiaResult, CiaValidator};
pub use llm::{ChatMessage, LlmBackend, LlmConfig, LlmError};
pub use pipeline::{compute_cci, AnalysisRequest, HybridPipeline};
pub use reasoning::{ReasoningEngine, ReasoningResult, ReasoningSource};
pub use report::{CciReport, FrameworkCompliance, HybridAnalysis};
pub use semantic::{ComplianceLevel, SemanticEngine, SemanticResult};
pub use structural::{SectionStatus, StructuralEngine, StructuralResult};

/// Compliance analysis error types
#[derive(Debug, Error)]
pub enum GuardError {
    /// Framework data file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Framework data file is malformed
    #[error("framework data error: {0}")]
    FrameworkData(String),
}

/// Result type for compliance analysis
pub type GuardResult<T> = Result<T, GuardError>;

/// A unit of document content extracted upstream.
///
/// Order-irrelevant; lives only for the duration of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    /// Clause text
    pub text: String,
    /// Section heading the clause was extracted from
    #[serde(default)]
    pub section: String,
}

impl Clause {
    /// Construct a clause
    pub fn new(text: &str, section: &str) -> Self {
        Self {
            text: text.into(),
            section: section.into(),
        }
    }
}

/// Round to 2 decimal places (score convention used across all layers)
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (keyword coverage convention)
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to 4 decimal places (similarity convention)
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
