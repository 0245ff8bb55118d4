//! Layer 2: embedding-based semantic similarity matching
//!
//! Embeds document clauses and framework control descriptions, grades each
//! clause by its best cosine match, and derives control coverage. Control
//! embeddings are computed once per framework and cached for the process
//! lifetime. When no embedding backend is available the layer degrades to a
//! keyword-overlap heuristic, labeled via the `note` field so downstream
//! consumers can discount it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use guard_ml::{EmbeddingBackend, EmbeddingCache};

use crate::catalog::{Control, FrameworkCatalog, Priority};
use crate::{round2, round4, Clause};

/// Similarity at or above this is a strong match
pub const STRONG_THRESHOLD: f64 = 0.70;

/// Similarity at or above this (and below strong) is a partial match;
/// a control with max coverage below this is considered missing
pub const PARTIAL_THRESHOLD: f64 = 0.45;

const CLAUSE_PREVIEW_LEN: usize = 120;

/// Compliance grade of a clause's best control match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceLevel {
    /// similarity >= 0.70
    Strong,
    /// 0.45 <= similarity < 0.70
    Partial,
    /// similarity < 0.45
    Weak,
}

impl ComplianceLevel {
    /// Classify a cosine similarity.
    ///
    /// Slightly negative similarities are possible (no clamping upstream)
    /// and simply fall into the weak band.
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= STRONG_THRESHOLD {
            ComplianceLevel::Strong
        } else if similarity >= PARTIAL_THRESHOLD {
            ComplianceLevel::Partial
        } else {
            ComplianceLevel::Weak
        }
    }
}

/// One clause's best control match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseMatch {
    /// Clause text, truncated for the report
    pub clause_text: String,
    /// Best-matching control id
    pub best_control_id: String,
    /// Best-matching control title
    pub best_control_title: String,
    /// Cosine similarity of the best match (4dp)
    pub similarity: f64,
    /// Grade derived from the similarity
    pub compliance_level: ComplianceLevel,
}

/// A control with no clause coverage above the partial threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingControl {
    /// Control id
    pub control_id: String,
    /// Control title
    pub title: String,
    /// Category grouping
    pub category: String,
    /// Remediation priority from the catalog
    pub priority: Priority,
}

impl From<&Control> for MissingControl {
    fn from(control: &Control) -> Self {
        Self {
            control_id: control.id.clone(),
            title: control.title.clone(),
            category: control.category.clone(),
            priority: control.priority,
        }
    }
}

/// Layer 2 output for one framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticResult {
    /// Framework key the analysis ran against
    pub framework: String,
    /// Aggregate semantic score, 0-100
    pub semantic_score: f64,
    /// Clauses with a strong best match
    pub strong_count: usize,
    /// Clauses with a partial best match
    pub partial_count: usize,
    /// Clauses with only weak matches
    pub weak_count: usize,
    /// Clauses analyzed
    pub total_clauses: usize,
    /// Controls with coverage at or above the partial threshold
    pub matched_controls: usize,
    /// Controls in the framework catalog
    pub total_controls: usize,
    /// matched_controls / total_controls as a percentage
    pub compliance_percentage: f64,
    /// Per-clause best matches, in input order
    pub clause_matches: Vec<ClauseMatch>,
    /// Max similarity per control id
    pub control_coverage: BTreeMap<String, f64>,
    /// Controls without coverage, in catalog order
    pub missing_controls: Vec<MissingControl>,
    /// Set when the result came from the degraded keyword fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SemanticResult {
    /// Zero-valued result: no clauses analyzed, every control missing.
    ///
    /// Used for the empty clause list (all controls are uncovered) and for
    /// unknown frameworks (where `controls` is empty, so `total_controls`
    /// is 0).
    pub fn empty(framework: &str, controls: &[Control]) -> Self {
        Self {
            framework: framework.to_string(),
            semantic_score: 0.0,
            strong_count: 0,
            partial_count: 0,
            weak_count: 0,
            total_clauses: 0,
            matched_controls: 0,
            total_controls: controls.len(),
            compliance_percentage: 0.0,
            clause_matches: Vec::new(),
            control_coverage: BTreeMap::new(),
            missing_controls: controls.iter().map(MissingControl::from).collect(),
            note: None,
        }
    }

    /// Weak and partial matches, weakest first (Layer 3 rewrite candidates)
    pub fn weak_matches(&self) -> Vec<&ClauseMatch> {
        let mut matches: Vec<&ClauseMatch> = self
            .clause_matches
            .iter()
            .filter(|m| m.compliance_level != ComplianceLevel::Strong)
            .collect();
        matches.sort_by(|a, b| {
            a.similarity
                .partial_cmp(&b.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }
}

/// Layer 2: semantic similarity engine.
///
/// The embedding backend is injected; `None` (or a backend reporting its
/// model unavailable) activates the keyword fallback.
pub struct SemanticEngine {
    catalog: Arc<FrameworkCatalog>,
    backend: Option<Arc<dyn EmbeddingBackend>>,
    cache: EmbeddingCache,
}

impl SemanticEngine {
    /// Create the engine over a shared catalog and optional backend
    pub fn new(catalog: Arc<FrameworkCatalog>, backend: Option<Arc<dyn EmbeddingBackend>>) -> Self {
        Self {
            catalog,
            backend,
            cache: EmbeddingCache::new(),
        }
    }

    /// Semantic analysis of document clauses against a framework
    pub fn analyze(&self, clauses: &[Clause], framework: &str) -> SemanticResult {
        let controls = self.catalog.controls(framework);

        let Some(backend) = self.backend.as_deref() else {
            return self.fallback_analysis(clauses, framework, controls);
        };

        let control_embeddings = self.cache.get_or_compute(framework, || {
            let texts: Vec<String> = controls
                .iter()
                .map(|c| {
                    if c.description.is_empty() {
                        c.title.clone()
                    } else {
                        c.description.clone()
                    }
                })
                .collect();
            if texts.is_empty() {
                return None;
            }
            backend.encode_batch(&texts)
        });

        let Some(control_embeddings) = control_embeddings else {
            return self.fallback_analysis(clauses, framework, controls);
        };

        if clauses.is_empty() {
            return SemanticResult::empty(framework, controls);
        }

        let clause_texts: Vec<String> = clauses.iter().map(|c| c.text.clone()).collect();
        let Some(clause_embeddings) = backend.encode_batch(&clause_texts) else {
            return self.fallback_analysis(clauses, framework, controls);
        };

        let mut clause_matches = Vec::with_capacity(clauses.len());
        let mut strong = 0usize;
        let mut partial = 0usize;
        let mut weak = 0usize;
        let mut control_max = vec![f64::NEG_INFINITY; controls.len()];

        for (text, embedding) in clause_texts.iter().zip(clause_embeddings.iter()) {
            let mut best_idx = 0usize;
            let mut best_sim = f64::NEG_INFINITY;
            for (j, control_embedding) in control_embeddings.iter().enumerate() {
                let sim = embedding.cosine_similarity(control_embedding) as f64;
                if sim > best_sim {
                    best_sim = sim;
                    best_idx = j;
                }
                if sim > control_max[j] {
                    control_max[j] = sim;
                }
            }

            let level = ComplianceLevel::from_similarity(best_sim);
            match level {
                ComplianceLevel::Strong => strong += 1,
                ComplianceLevel::Partial => partial += 1,
                ComplianceLevel::Weak => weak += 1,
            }

            clause_matches.push(ClauseMatch {
                clause_text: truncate(text, CLAUSE_PREVIEW_LEN),
                best_control_id: controls[best_idx].id.clone(),
                best_control_title: controls[best_idx].title.clone(),
                similarity: round4(best_sim),
                compliance_level: level,
            });
        }

        let mut control_coverage = BTreeMap::new();
        let mut matched_ids = BTreeSet::new();
        for (j, control) in controls.iter().enumerate() {
            let coverage = control_max[j];
            control_coverage.insert(control.id.clone(), round4(coverage));
            if coverage >= PARTIAL_THRESHOLD {
                matched_ids.insert(control.id.clone());
            }
        }

        let missing_controls: Vec<MissingControl> = controls
            .iter()
            .filter(|c| !matched_ids.contains(&c.id))
            .map(MissingControl::from)
            .collect();

        let total = clauses.len();
        let semantic_score = round2((strong as f64 + partial as f64 * 0.5) / total as f64 * 100.0);
        let compliance_percentage = if controls.is_empty() {
            0.0
        } else {
            round2(matched_ids.len() as f64 / controls.len() as f64 * 100.0)
        };

        tracing::debug!(
            framework,
            semantic_score,
            strong,
            partial,
            weak,
            matched = matched_ids.len(),
            "semantic analysis complete"
        );

        SemanticResult {
            framework: framework.to_string(),
            semantic_score,
            strong_count: strong,
            partial_count: partial,
            weak_count: weak,
            total_clauses: total,
            matched_controls: matched_ids.len(),
            total_controls: controls.len(),
            compliance_percentage,
            clause_matches,
            control_coverage,
            missing_controls,
            note: None,
        }
    }

    /// Keyword-overlap heuristic used when no embedding model is available.
    ///
    /// A control counts as matched when any of the first six words (longer
    /// than 3 characters) of its description appears in the concatenated
    /// clause text. Everything matched is reported as partial; this is a
    /// deliberately coarse approximation.
    fn fallback_analysis(
        &self,
        clauses: &[Clause],
        framework: &str,
        controls: &[Control],
    ) -> SemanticResult {
        if clauses.is_empty() || controls.is_empty() {
            return SemanticResult::empty(framework, controls);
        }

        tracing::warn!(framework, "embedding backend unavailable, using keyword fallback");

        let all_text = clauses
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut matched_ids = BTreeSet::new();
        for control in controls {
            let source = if control.description.is_empty() {
                &control.title
            } else {
                &control.description
            };
            let hit = source
                .to_lowercase()
                .split_whitespace()
                .take(6)
                .filter(|w| w.len() > 3)
                .any(|w| all_text.contains(w));
            if hit {
                matched_ids.insert(control.id.clone());
            }
        }

        let missing_controls: Vec<MissingControl> = controls
            .iter()
            .filter(|c| !matched_ids.contains(&c.id))
            .map(MissingControl::from)
            .collect();

        let total = clauses.len();
        // A clause set smaller than the matched-control count would push
        // weak_count negative; clamp so the count invariant holds.
        let partial_count = matched_ids.len().min(total);
        let score = round2(matched_ids.len() as f64 / controls.len() as f64 * 100.0);

        SemanticResult {
            framework: framework.to_string(),
            semantic_score: score,
            strong_count: 0,
            partial_count,
            weak_count: total - partial_count,
            total_clauses: total,
            matched_controls: matched_ids.len(),
            total_controls: controls.len(),
            compliance_percentage: score,
            clause_matches: Vec::new(),
            control_coverage: BTreeMap::new(),
            missing_controls,
            note: Some("Fallback keyword analysis (embedding model unavailable)".to_string()),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard_ml::FeatureVector;

    /// Deterministic fake backend: maps known texts onto fixed unit vectors
    struct FakeBackend;

    impl EmbeddingBackend for FakeBackend {
        fn encode(&self, text: &str) -> Option<FeatureVector> {
            let lower = text.to_lowercase();
            // Axis 0: access control language, axis 1: backup language
            let v = if lower.contains("access") {
                [1.0, 0.0, 0.0]
            } else if lower.contains("backup") {
                [0.0, 1.0, 0.0]
            } else {
                [0.0, 0.0, 1.0]
            };
            Some(FeatureVector::from_slice(&v))
        }
    }

    fn engine_with_backend() -> SemanticEngine {
        SemanticEngine::new(
            Arc::new(FrameworkCatalog::builtin()),
            Some(Arc::new(FakeBackend)),
        )
    }

    fn engine_without_backend() -> SemanticEngine {
        SemanticEngine::new(Arc::new(FrameworkCatalog::builtin()), None)
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(ComplianceLevel::from_similarity(0.70), ComplianceLevel::Strong);
        assert_eq!(ComplianceLevel::from_similarity(0.45), ComplianceLevel::Partial);
        assert_eq!(ComplianceLevel::from_similarity(0.449), ComplianceLevel::Weak);
        assert_eq!(ComplianceLevel::from_similarity(-0.2), ComplianceLevel::Weak);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let clauses = vec![
            Clause::new("Access to systems requires strong authentication.", "1"),
            Clause::new("Backup copies are taken weekly.", "2"),
            Clause::new("Unrelated text about gardening.", "3"),
        ];
        let result = engine_with_backend().analyze(&clauses, "iso27001");
        assert_eq!(
            result.strong_count + result.partial_count + result.weak_count,
            result.total_clauses
        );
        assert_eq!(result.total_clauses, 3);
    }

    #[test]
    fn test_strong_match_found() {
        let clauses = vec![Clause::new("We enforce access restrictions on all data.", "1")];
        let result = engine_with_backend().analyze(&clauses, "iso27001");
        // The fake backend puts this clause and the access-control control
        // on the same axis, so similarity is 1.0
        assert_eq!(result.strong_count, 1);
        assert_eq!(result.clause_matches[0].compliance_level, ComplianceLevel::Strong);
        assert_eq!(result.clause_matches[0].similarity, 1.0);
    }

    #[test]
    fn test_missing_controls_annotated() {
        let clauses = vec![Clause::new("Nothing relevant here at all.", "1")];
        let result = engine_with_backend().analyze(&clauses, "iso27001");
        assert!(!result.missing_controls.is_empty());
        assert_eq!(
            result.missing_controls.len() + result.matched_controls,
            result.total_controls
        );
    }

    #[test]
    fn test_unknown_framework() {
        let clauses = vec![Clause::new("anything", "1")];
        let result = engine_with_backend().analyze(&clauses, "foo");
        assert_eq!(result.total_controls, 0);
        assert_eq!(result.semantic_score, 0.0);
    }

    #[test]
    fn test_empty_clauses_all_controls_missing() {
        let result = engine_with_backend().analyze(&[], "gdpr");
        assert_eq!(result.total_clauses, 0);
        assert_eq!(result.semantic_score, 0.0);
        assert_eq!(result.missing_controls.len(), result.total_controls);
    }

    #[test]
    fn test_fallback_is_labeled() {
        let clauses = vec![Clause::new(
            "Policies for information security are approved by management.",
            "1",
        )];
        let result = engine_without_backend().analyze(&clauses, "iso27001");
        assert!(result.note.is_some());
        assert_eq!(result.strong_count, 0);
        assert!(result.matched_controls > 0);
        assert_eq!(
            result.strong_count + result.partial_count + result.weak_count,
            result.total_clauses
        );
    }

    #[test]
    fn test_embeddings_cached_per_framework() {
        let engine = engine_with_backend();
        let clauses = vec![Clause::new("access control", "1")];
        let a = engine.analyze(&clauses, "iso27001");
        let b = engine.analyze(&clauses, "iso27001");
        assert_eq!(a.semantic_score, b.semantic_score);
        assert_eq!(a.clause_matches[0].similarity, b.clause_matches[0].similarity);
    }
}
