//! Layer 1: rule-based structural compliance checks
//!
//! Deterministic detection of mandatory sections via case-insensitive
//! keyword presence. Pure string processing, no I/O.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{CiaPillar, FrameworkCatalog};
use crate::{round1, round2, Clause};

/// Detection status of one required section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    /// At least half the section keywords were found
    Present,
    /// Some, but fewer than half, keywords were found
    Partial,
    /// No keyword found
    Missing,
}

impl SectionStatus {
    /// Lowercase wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionStatus::Present => "present",
            SectionStatus::Partial => "partial",
            SectionStatus::Missing => "missing",
        }
    }
}

/// Per-section detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    /// Framework clause identifier
    pub clause_id: String,
    /// Clause title
    pub title: String,
    /// Detection status
    pub status: SectionStatus,
    /// Keywords found in the document
    pub matched_keywords: Vec<String>,
    /// Percentage of the section's keywords found (1dp)
    pub keyword_coverage: f64,
    /// CIA pillar this section protects, if tagged
    pub cia_pillar: Option<CiaPillar>,
}

/// A missing CIA-tagged section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralFlag {
    /// Framework clause identifier
    pub clause_id: String,
    /// Clause title
    pub title: String,
    /// Impact description
    pub impact: String,
}

/// Missing-section flags grouped by CIA pillar.
///
/// All three pillars are always present (possibly empty) so the JSON shape
/// is stable for consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CiaStructuralFlags {
    /// Missing sections weakening confidentiality
    pub confidentiality: Vec<StructuralFlag>,
    /// Missing sections weakening integrity
    pub integrity: Vec<StructuralFlag>,
    /// Missing sections weakening availability
    pub availability: Vec<StructuralFlag>,
}

impl CiaStructuralFlags {
    fn push(&mut self, pillar: CiaPillar, flag: StructuralFlag) {
        match pillar {
            CiaPillar::Confidentiality => self.confidentiality.push(flag),
            CiaPillar::Integrity => self.integrity.push(flag),
            CiaPillar::Availability => self.availability.push(flag),
        }
    }

    /// Flags for one pillar
    pub fn get(&self, pillar: CiaPillar) -> &[StructuralFlag] {
        match pillar {
            CiaPillar::Confidentiality => &self.confidentiality,
            CiaPillar::Integrity => &self.integrity,
            CiaPillar::Availability => &self.availability,
        }
    }
}

/// Layer 1 output for one framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralResult {
    /// Framework key the analysis ran against
    pub framework: String,
    /// Aggregate structural score, 0-100
    pub structural_score: f64,
    /// Number of required sections in the catalog
    pub total_required: usize,
    /// Sections fully detected
    pub present: usize,
    /// Sections partially detected
    pub partial: usize,
    /// Sections not detected
    pub missing: usize,
    /// Per-section detail, in catalog order
    pub section_results: Vec<SectionResult>,
    /// Missing CIA-tagged sections, grouped by pillar
    pub cia_structural_flags: CiaStructuralFlags,
}

impl StructuralResult {
    /// Zero-valued result for an unknown framework
    pub fn empty(framework: &str) -> Self {
        Self {
            framework: framework.to_string(),
            structural_score: 0.0,
            total_required: 0,
            present: 0,
            partial: 0,
            missing: 0,
            section_results: Vec::new(),
            cia_structural_flags: CiaStructuralFlags::default(),
        }
    }

    /// Sections with status other than present (gap candidates for Layer 3)
    pub fn gap_sections(&self) -> impl Iterator<Item = &SectionResult> {
        self.section_results
            .iter()
            .filter(|s| s.status != SectionStatus::Present)
    }
}

/// Layer 1: deterministic structural compliance checker.
///
/// For each mandatory clause the engine searches the document for the
/// clause keywords, marks it present / partial / missing, and derives an
/// aggregate structural score (0-100).
pub struct StructuralEngine {
    catalog: Arc<FrameworkCatalog>,
}

impl StructuralEngine {
    /// Create the engine over a shared catalog
    pub fn new(catalog: Arc<FrameworkCatalog>) -> Self {
        Self { catalog }
    }

    /// Run the structural check against a single framework.
    ///
    /// Keywords are matched as case-insensitive substrings in either the
    /// full document text or the concatenated clause texts. An unknown
    /// framework yields a zero-valued result, never an error; callers
    /// detect it via `total_required == 0`.
    pub fn analyze(&self, full_text: &str, clauses: &[Clause], framework: &str) -> StructuralResult {
        let required = self.catalog.required_sections(framework);
        if required.is_empty() {
            tracing::warn!(framework, "no structural mapping for framework");
            return StructuralResult::empty(framework);
        }

        let text_lower = full_text.to_lowercase();
        let clause_text_lower = clauses
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut section_results = Vec::with_capacity(required.len());
        let mut cia_flags = CiaStructuralFlags::default();
        let mut present = 0usize;
        let mut partial = 0usize;
        let mut missing = 0usize;

        for req in required {
            let matched_keywords: Vec<String> = req
                .keywords
                .iter()
                .filter(|kw| {
                    let kw = kw.to_lowercase();
                    text_lower.contains(&kw) || clause_text_lower.contains(&kw)
                })
                .map(|kw| kw.to_string())
                .collect();

            let ratio = if req.keywords.is_empty() {
                0.0
            } else {
                matched_keywords.len() as f64 / req.keywords.len() as f64
            };

            let status = if ratio >= 0.5 {
                present += 1;
                SectionStatus::Present
            } else if ratio > 0.0 {
                partial += 1;
                SectionStatus::Partial
            } else {
                missing += 1;
                SectionStatus::Missing
            };

            if let (Some(pillar), SectionStatus::Missing) = (req.cia_pillar, status) {
                cia_flags.push(
                    pillar,
                    StructuralFlag {
                        clause_id: req.clause_id.to_string(),
                        title: req.title.to_string(),
                        impact: format!("Missing {} weakens {} pillar", req.title, pillar.label()),
                    },
                );
            }

            section_results.push(SectionResult {
                clause_id: req.clause_id.to_string(),
                title: req.title.to_string(),
                status,
                matched_keywords,
                keyword_coverage: round1(ratio * 100.0),
                cia_pillar: req.cia_pillar,
            });
        }

        let total = required.len();
        let structural_score = round2((present as f64 + partial as f64 * 0.5) / total as f64 * 100.0);

        tracing::debug!(
            framework,
            structural_score,
            present,
            partial,
            missing,
            "structural analysis complete"
        );

        StructuralResult {
            framework: framework.to_string(),
            structural_score,
            total_required: total,
            present,
            partial,
            missing,
            section_results,
            cia_structural_flags: cia_flags,
        }
    }
}
