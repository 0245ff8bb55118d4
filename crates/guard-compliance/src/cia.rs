//! CIA (Confidentiality, Integrity, Availability) validation
//!
//! Classifies clauses into CIA pillars by keyword counting, aggregates
//! document-level coverage, and derives the CIA Balance Index: 100 at a
//! perfect 1/3 split, 0 when all clauses land on a single pillar.

use serde::{Deserialize, Serialize};

use crate::catalog::CiaPillar;
use crate::{round2, Clause};

/// Population standard deviation of [100, 0, 0], the worst-case coverage split
const MAX_COVERAGE_STD_DEV: f64 = 47.14;

const CLAUSE_PREVIEW_LEN: usize = 100;

const CONFIDENTIALITY_KEYWORDS: &[&str] = &[
    "confidential",
    "privacy",
    "secret",
    "classified",
    "access control",
    "authentication",
    "authorization",
    "encryption",
    "data protection",
    "information disclosure",
    "need-to-know",
    "clearance",
    "sensitive",
    "personal data",
    "pii",
    "gdpr",
    "data privacy",
];

const INTEGRITY_KEYWORDS: &[&str] = &[
    "integrity",
    "accuracy",
    "validity",
    "completeness",
    "consistency",
    "verification",
    "validation",
    "audit trail",
    "change control",
    "version control",
    "tampering",
    "modification",
    "alteration",
    "digital signature",
    "hash",
    "checksum",
    "quality",
    "correctness",
];

const AVAILABILITY_KEYWORDS: &[&str] = &[
    "availability",
    "uptime",
    "accessible",
    "redundancy",
    "backup",
    "disaster recovery",
    "business continuity",
    "failover",
    "resilience",
    "recovery time",
    "rto",
    "rpo",
    "downtime",
    "service level",
    "performance",
    "reliability",
    "fault tolerance",
    "high availability",
];

fn keywords_for(pillar: CiaPillar) -> &'static [&'static str] {
    match pillar {
        CiaPillar::Confidentiality => CONFIDENTIALITY_KEYWORDS,
        CiaPillar::Integrity => INTEGRITY_KEYWORDS,
        CiaPillar::Availability => AVAILABILITY_KEYWORDS,
    }
}

fn pillar_description(pillar: CiaPillar) -> &'static str {
    match pillar {
        CiaPillar::Confidentiality => {
            "ensuring that information is accessible only to authorized individuals"
        }
        CiaPillar::Integrity => "maintaining accuracy and completeness of data",
        CiaPillar::Availability => {
            "ensuring timely and reliable access to information and systems"
        }
    }
}

/// One value per CIA pillar, serialized with the pillar names as fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CiaTriple<T> {
    /// Confidentiality value
    pub confidentiality: T,
    /// Integrity value
    pub integrity: T,
    /// Availability value
    pub availability: T,
}

impl<T: Copy> CiaTriple<T> {
    /// Value for one pillar
    pub fn get(&self, pillar: CiaPillar) -> T {
        match pillar {
            CiaPillar::Confidentiality => self.confidentiality,
            CiaPillar::Integrity => self.integrity,
            CiaPillar::Availability => self.availability,
        }
    }

    fn get_mut(&mut self, pillar: CiaPillar) -> &mut T {
        match pillar {
            CiaPillar::Confidentiality => &mut self.confidentiality,
            CiaPillar::Integrity => &mut self.integrity,
            CiaPillar::Availability => &mut self.availability,
        }
    }

    /// Values in pillar order (C, I, A)
    pub fn values(&self) -> [T; 3] {
        [self.confidentiality, self.integrity, self.availability]
    }
}

/// CIA classification of a single clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseCia {
    /// Clause text, truncated for the report
    pub clause: String,
    /// Pillar with the most keyword hits (confidentiality on a full tie)
    pub primary_category: CiaPillar,
    /// Raw keyword hit counts per pillar
    pub cia_scores: CiaTriple<usize>,
    /// Hit counts normalized to percentages
    pub cia_percentages: CiaTriple<f64>,
    /// True when more than one pillar had hits
    pub is_multi_category: bool,
    /// Pillars with at least one hit
    pub categories: Vec<CiaPillar>,
}

/// How the balance index reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceRating {
    /// Balance index >= 85
    Excellent,
    /// Balance index >= 70
    Good,
    /// Balance index >= 50
    Fair,
    /// Balance index < 50
    Poor,
}

impl BalanceRating {
    fn from_index(index: f64) -> Self {
        if index >= 85.0 {
            BalanceRating::Excellent
        } else if index >= 70.0 {
            BalanceRating::Good
        } else if index >= 50.0 {
            BalanceRating::Fair
        } else {
            BalanceRating::Poor
        }
    }
}

/// Direction of a coverage imbalance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceKind {
    /// Coverage below the ideal band
    UnderCovered,
    /// Coverage above the ideal band
    OverCovered,
}

/// Imbalance severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImbalanceSeverity {
    /// Over-coverage, informational
    Low,
    /// Under-coverage above 15%
    Medium,
    /// Under-coverage below 15%
    High,
}

/// A pillar whose coverage falls outside the ideal 25-40% band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiaImbalance {
    /// Affected pillar
    pub category: CiaPillar,
    /// Under- or over-covered
    #[serde(rename = "type")]
    pub kind: ImbalanceKind,
    /// Observed coverage percentage
    pub percentage: f64,
    /// Distance below the ideal minimum, for under-coverage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    /// Distance above the ideal maximum, for over-coverage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess: Option<f64>,
    /// How serious the imbalance is
    pub severity: ImbalanceSeverity,
    /// Human-readable description
    pub detail: String,
}

/// Document-level CIA analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiaResult {
    /// Clauses analyzed
    pub total_clauses: usize,
    /// Percentage of clauses primarily in each pillar
    pub cia_coverage: CiaTriple<f64>,
    /// Clause counts per primary pillar
    pub cia_distribution: CiaTriple<usize>,
    /// Balance index, 0-100
    pub cia_balance_index: f64,
    /// Rating band for the balance index
    pub balance_rating: BalanceRating,
    /// Pillars outside the ideal coverage band
    pub imbalances: Vec<CiaImbalance>,
    /// Actionable follow-ups derived from the imbalances
    pub recommendations: Vec<String>,
}

impl CiaResult {
    /// Zero-valued result for an empty clause list
    pub fn empty() -> Self {
        Self {
            total_clauses: 0,
            cia_coverage: CiaTriple::default(),
            cia_distribution: CiaTriple::default(),
            cia_balance_index: 0.0,
            balance_rating: BalanceRating::Poor,
            imbalances: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Keyword-driven CIA classifier.
///
/// Stateless; one instance can serve the whole process.
#[derive(Debug, Default)]
pub struct CiaValidator;

impl CiaValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Classify a single clause by keyword hit counts.
    ///
    /// Ties resolve in pillar order, so a clause with no keyword hits at
    /// all is attributed to confidentiality with an even percentage split.
    pub fn classify_clause(&self, clause_text: &str) -> ClauseCia {
        let lower = clause_text.to_lowercase();
        let mut scores = CiaTriple::<usize>::default();

        for pillar in CiaPillar::ALL {
            let hits = keywords_for(pillar)
                .iter()
                .filter(|kw| lower.contains(*kw))
                .count();
            *scores.get_mut(pillar) = hits;
        }

        let total: usize = scores.values().iter().sum();
        let percentages = if total > 0 {
            CiaTriple {
                confidentiality: round2(scores.confidentiality as f64 / total as f64 * 100.0),
                integrity: round2(scores.integrity as f64 / total as f64 * 100.0),
                availability: round2(scores.availability as f64 / total as f64 * 100.0),
            }
        } else {
            CiaTriple {
                confidentiality: 33.33,
                integrity: 33.33,
                availability: 33.34,
            }
        };

        let mut primary = CiaPillar::Confidentiality;
        let mut best = scores.confidentiality;
        for pillar in [CiaPillar::Integrity, CiaPillar::Availability] {
            if scores.get(pillar) > best {
                best = scores.get(pillar);
                primary = pillar;
            }
        }

        let categories: Vec<CiaPillar> = CiaPillar::ALL
            .into_iter()
            .filter(|p| scores.get(*p) > 0)
            .collect();

        ClauseCia {
            clause: preview(clause_text),
            primary_category: primary,
            cia_scores: scores,
            cia_percentages: percentages,
            is_multi_category: categories.len() > 1,
            categories,
        }
    }

    /// Analyze a whole document's clause set.
    ///
    /// An empty clause list yields the zero-valued result rather than an
    /// error.
    pub fn analyze_document(&self, clauses: &[Clause]) -> CiaResult {
        if clauses.is_empty() {
            return CiaResult::empty();
        }

        let mut distribution = CiaTriple::<usize>::default();
        for clause in clauses {
            let classification = self.classify_clause(&clause.text);
            *distribution.get_mut(classification.primary_category) += 1;
        }

        let total = clauses.len();
        let coverage = CiaTriple {
            confidentiality: round2(distribution.confidentiality as f64 / total as f64 * 100.0),
            integrity: round2(distribution.integrity as f64 / total as f64 * 100.0),
            availability: round2(distribution.availability as f64 / total as f64 * 100.0),
        };

        let balance_index = self.balance_index(coverage);
        let imbalances = identify_imbalances(coverage);
        let recommendations = recommendations(&imbalances);

        tracing::debug!(
            total_clauses = total,
            balance_index,
            imbalance_count = imbalances.len(),
            "CIA analysis complete"
        );

        CiaResult {
            total_clauses: total,
            cia_coverage: coverage,
            cia_distribution: distribution,
            cia_balance_index: balance_index,
            balance_rating: BalanceRating::from_index(balance_index),
            imbalances,
            recommendations,
        }
    }

    /// CIA Balance Index from coverage percentages.
    ///
    /// 100 − (population std dev of the three percentages / 47.14) × 100,
    /// rounded to 2dp. Coverage of [100, 0, 0] hits the normalizing
    /// constant exactly and scores 0.
    pub fn balance_index(&self, coverage: CiaTriple<f64>) -> f64 {
        let values = coverage.values();
        let mean = values.iter().sum::<f64>() / 3.0;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 3.0;
        let std_dev = variance.sqrt();
        round2(100.0 - std_dev / MAX_COVERAGE_STD_DEV * 100.0)
    }
}

fn identify_imbalances(coverage: CiaTriple<f64>) -> Vec<CiaImbalance> {
    const IDEAL_MIN: f64 = 25.0;
    const IDEAL_MAX: f64 = 40.0;

    let mut imbalances = Vec::new();
    for pillar in CiaPillar::ALL {
        let percentage = coverage.get(pillar);
        if percentage < IDEAL_MIN {
            imbalances.push(CiaImbalance {
                category: pillar,
                kind: ImbalanceKind::UnderCovered,
                percentage,
                gap: Some(round2(IDEAL_MIN - percentage)),
                excess: None,
                severity: if percentage < 15.0 {
                    ImbalanceSeverity::High
                } else {
                    ImbalanceSeverity::Medium
                },
                detail: format!(
                    "{} controls are significantly under-represented",
                    pillar.label()
                ),
            });
        } else if percentage > IDEAL_MAX {
            imbalances.push(CiaImbalance {
                category: pillar,
                kind: ImbalanceKind::OverCovered,
                percentage,
                gap: None,
                excess: Some(round2(percentage - IDEAL_MAX)),
                severity: ImbalanceSeverity::Low,
                detail: format!(
                    "Over-emphasis on {} may indicate neglect of other areas",
                    pillar.label()
                ),
            });
        }
    }
    imbalances
}

fn recommendations(imbalances: &[CiaImbalance]) -> Vec<String> {
    let mut out = Vec::new();
    for imbalance in imbalances {
        if imbalance.kind == ImbalanceKind::UnderCovered {
            out.push(format!(
                "Strengthen {} controls: currently at {}%, should be 25-40%. Add controls related to {}.",
                imbalance.category.label().to_uppercase(),
                imbalance.percentage,
                pillar_description(imbalance.category),
            ));
        }
    }
    if imbalances.is_empty() {
        out.push("CIA coverage is well-balanced across all three pillars.".to_string());
    }
    out
}

fn preview(text: &str) -> String {
    if text.chars().count() > CLAUSE_PREVIEW_LEN {
        let truncated: String = text.chars().take(CLAUSE_PREVIEW_LEN).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_confidentiality() {
        let result = CiaValidator::new()
            .classify_clause("All sensitive data must use encryption and access control.");
        assert_eq!(result.primary_category, CiaPillar::Confidentiality);
        assert!(result.cia_scores.confidentiality >= 3);
        assert!(!result.is_multi_category || result.categories.len() > 1);
    }

    #[test]
    fn test_classify_multi_category() {
        let result = CiaValidator::new()
            .classify_clause("Backups preserve data integrity during disaster recovery.");
        assert!(result.is_multi_category);
        assert!(result.categories.contains(&CiaPillar::Integrity));
        assert!(result.categories.contains(&CiaPillar::Availability));
    }

    #[test]
    fn test_no_keywords_defaults_to_even_split() {
        let result = CiaValidator::new().classify_clause("The weather was nice today.");
        assert_eq!(result.primary_category, CiaPillar::Confidentiality);
        assert_eq!(result.cia_percentages.confidentiality, 33.33);
        assert_eq!(result.cia_percentages.integrity, 33.33);
        assert_eq!(result.cia_percentages.availability, 33.34);
        assert!(!result.is_multi_category);
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_perfect_balance_scores_100() {
        let validator = CiaValidator::new();
        let index = validator.balance_index(CiaTriple {
            confidentiality: 33.33,
            integrity: 33.33,
            availability: 33.33,
        });
        assert_eq!(index, 100.0);
    }

    #[test]
    fn test_full_imbalance_scores_zero() {
        let validator = CiaValidator::new();
        let index = validator.balance_index(CiaTriple {
            confidentiality: 100.0,
            integrity: 0.0,
            availability: 0.0,
        });
        assert_eq!(index, 0.0);
    }

    #[test]
    fn test_document_analysis_counts() {
        let clauses = vec![
            Clause::new("Encryption protects confidential records.", "1"),
            Clause::new("Audit trail verification ensures data integrity.", "2"),
            Clause::new("Failover and redundancy guarantee uptime.", "3"),
        ];
        let result = CiaValidator::new().analyze_document(&clauses);
        assert_eq!(result.total_clauses, 3);
        assert_eq!(result.cia_distribution.confidentiality, 1);
        assert_eq!(result.cia_distribution.integrity, 1);
        assert_eq!(result.cia_distribution.availability, 1);
        assert_eq!(result.cia_balance_index, 100.0);
        assert_eq!(result.balance_rating, BalanceRating::Excellent);
        assert!(result.imbalances.is_empty());
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_under_coverage_flagged_high() {
        let clauses = vec![
            Clause::new("Encryption everywhere.", "1"),
            Clause::new("More encryption and privacy.", "2"),
            Clause::new("Access control for sensitive assets.", "3"),
        ];
        let result = CiaValidator::new().analyze_document(&clauses);
        let integrity = result
            .imbalances
            .iter()
            .find(|i| i.category == CiaPillar::Integrity)
            .unwrap();
        assert_eq!(integrity.kind, ImbalanceKind::UnderCovered);
        assert_eq!(integrity.severity, ImbalanceSeverity::High);
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_empty_clauses_zero_result() {
        let result = CiaValidator::new().analyze_document(&[]);
        assert_eq!(result.total_clauses, 0);
        assert_eq!(result.cia_balance_index, 0.0);
        assert_eq!(result.balance_rating, BalanceRating::Poor);
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(BalanceRating::from_index(85.0), BalanceRating::Excellent);
        assert_eq!(BalanceRating::from_index(84.9), BalanceRating::Good);
        assert_eq!(BalanceRating::from_index(70.0), BalanceRating::Good);
        assert_eq!(BalanceRating::from_index(50.0), BalanceRating::Fair);
        assert_eq!(BalanceRating::from_index(49.9), BalanceRating::Poor);
    }
}
