//! Framework catalogs: required sections and reference controls
//!
//! Loaded once at process start and shared read-only across concurrent
//! analyses. Built-in data covers the four supported frameworks; a data
//! directory of per-framework JSON files can override the control lists.

pub mod gdpr;
pub mod iso27001;
pub mod iso9001;
pub mod nist;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{GuardError, GuardResult};

/// Supported compliance framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    /// ISO/IEC 27001 Information Security Management
    Iso27001,
    /// ISO 9001 Quality Management
    Iso9001,
    /// NIST Cybersecurity Framework
    NistCsf,
    /// General Data Protection Regulation
    Gdpr,
}

impl Framework {
    /// All supported frameworks, in catalog order
    pub const ALL: [Framework; 4] = [
        Framework::Iso27001,
        Framework::Iso9001,
        Framework::NistCsf,
        Framework::Gdpr,
    ];

    /// Parse a framework key (`iso27001`, `iso9001`, `nist`, `gdpr`)
    pub fn from_key(key: &str) -> Option<Framework> {
        match key {
            "iso27001" => Some(Framework::Iso27001),
            "iso9001" => Some(Framework::Iso9001),
            "nist" => Some(Framework::NistCsf),
            "gdpr" => Some(Framework::Gdpr),
            _ => None,
        }
    }

    /// Canonical string key
    pub fn key(&self) -> &'static str {
        match self {
            Framework::Iso27001 => "iso27001",
            Framework::Iso9001 => "iso9001",
            Framework::NistCsf => "nist",
            Framework::Gdpr => "gdpr",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framework::Iso27001 => write!(f, "ISO 27001"),
            Framework::Iso9001 => write!(f, "ISO 9001"),
            Framework::NistCsf => write!(f, "NIST CSF"),
            Framework::Gdpr => write!(f, "GDPR"),
        }
    }
}

/// CIA triad pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiaPillar {
    /// Information accessible only to authorized parties
    Confidentiality,
    /// Accuracy and completeness of data
    Integrity,
    /// Timely and reliable access to systems
    Availability,
}

impl CiaPillar {
    /// All pillars, in tie-break order (confidentiality > integrity > availability)
    pub const ALL: [CiaPillar; 3] = [
        CiaPillar::Confidentiality,
        CiaPillar::Integrity,
        CiaPillar::Availability,
    ];

    /// Capitalized display label
    pub fn label(&self) -> &'static str {
        match self {
            CiaPillar::Confidentiality => "Confidentiality",
            CiaPillar::Integrity => "Integrity",
            CiaPillar::Availability => "Availability",
        }
    }
}

impl std::fmt::Display for CiaPillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Mandatory section a framework expects a policy document to contain
#[derive(Debug, Clone)]
pub struct RequiredSection {
    /// Framework clause identifier (e.g. "6.1.2", "A.9", "Art.32")
    pub clause_id: &'static str,
    /// Clause title
    pub title: &'static str,
    /// Keywords whose presence marks the section as covered
    pub keywords: &'static [&'static str],
    /// Whether the section is mandatory for certification
    pub mandatory: bool,
    /// CIA pillar weakened when this section is missing
    pub cia_pillar: Option<CiaPillar>,
}

/// Control priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Must be addressed before any audit
    Critical,
    /// Address in the current remediation cycle
    High,
    /// Address in a planned cycle
    Medium,
    /// Monitor
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Individual framework requirement used by the semantic layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    /// Control identifier
    pub id: String,
    /// Control title
    pub title: String,
    /// Full-text requirement description (embedded by the semantic layer)
    pub description: String,
    /// Category grouping
    #[serde(default = "default_category")]
    pub category: String,
    /// Remediation priority
    #[serde(default)]
    pub priority: Priority,
}

fn default_category() -> String {
    "General".to_string()
}

impl Control {
    pub(crate) fn new(
        id: &str,
        title: &str,
        description: &str,
        category: &str,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            priority,
        }
    }
}

/// On-disk framework data file: `{ name, controls: [...] }`
#[derive(Debug, Deserialize)]
struct FrameworkFile {
    #[allow(dead_code)]
    name: Option<String>,
    #[serde(default)]
    controls: Vec<Control>,
}

/// Immutable catalog of required sections and controls per framework.
///
/// Unknown framework keys resolve to empty slices; callers detect
/// "framework not supported" via `total_required == 0`, never via an error.
pub struct FrameworkCatalog {
    sections: HashMap<Framework, Vec<RequiredSection>>,
    controls: HashMap<Framework, Vec<Control>>,
}

impl FrameworkCatalog {
    /// Catalog with built-in section tables and control lists
    pub fn builtin() -> Self {
        let mut sections = HashMap::new();
        let mut controls = HashMap::new();

        sections.insert(Framework::Iso27001, iso27001::required_sections());
        sections.insert(Framework::Iso9001, iso9001::required_sections());
        sections.insert(Framework::NistCsf, nist::required_sections());
        sections.insert(Framework::Gdpr, gdpr::required_sections());

        controls.insert(Framework::Iso27001, iso27001::controls());
        controls.insert(Framework::Iso9001, iso9001::controls());
        controls.insert(Framework::NistCsf, nist::controls());
        controls.insert(Framework::Gdpr, gdpr::controls());

        let total: usize = controls.values().map(Vec::len).sum();
        tracing::info!(controls = total, "loaded built-in framework catalogs");

        Self { sections, controls }
    }

    /// Built-in catalog with control lists overridden from `<key>.json`
    /// files in `dir`. A missing file keeps the built-in list; a malformed
    /// file is a hard error (corrupted framework data must not silently
    /// degrade the analysis).
    pub fn load_dir(dir: &Path) -> GuardResult<Self> {
        let mut catalog = Self::builtin();

        for framework in Framework::ALL {
            let path = dir.join(format!("{}.json", framework.key()));
            if !path.exists() {
                continue;
            }
            let raw = std::fs::read_to_string(&path)?;
            let file: FrameworkFile = serde_json::from_str(&raw).map_err(|e| {
                GuardError::FrameworkData(format!("{}: {}", path.display(), e))
            })?;
            tracing::info!(
                framework = framework.key(),
                controls = file.controls.len(),
                "loaded framework controls from data directory"
            );
            catalog.controls.insert(framework, file.controls);
        }

        Ok(catalog)
    }

    /// Required sections for a framework key (empty when unknown)
    pub fn required_sections(&self, key: &str) -> &[RequiredSection] {
        Framework::from_key(key)
            .and_then(|fw| self.sections.get(&fw))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reference controls for a framework key (empty when unknown)
    pub fn controls(&self, key: &str) -> &[Control] {
        Framework::from_key(key)
            .and_then(|fw| self.controls.get(&fw))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for FrameworkCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_keys() {
        assert_eq!(Framework::from_key("iso27001"), Some(Framework::Iso27001));
        assert_eq!(Framework::from_key("nist"), Some(Framework::NistCsf));
        assert_eq!(Framework::from_key("foo"), None);
        assert_eq!(Framework::Gdpr.key(), "gdpr");
    }

    #[test]
    fn test_builtin_catalog_populated() {
        let catalog = FrameworkCatalog::builtin();
        for framework in Framework::ALL {
            assert!(!catalog.required_sections(framework.key()).is_empty());
            assert!(!catalog.controls(framework.key()).is_empty());
        }
        assert!(catalog.required_sections("foo").is_empty());
        assert!(catalog.controls("foo").is_empty());
    }

    #[test]
    fn test_load_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nist.json"),
            r#"{"name":"NIST CSF","controls":[{"id":"X.1","title":"Test","description":"test control"}]}"#,
        )
        .unwrap();

        let catalog = FrameworkCatalog::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.controls("nist").len(), 1);
        assert_eq!(catalog.controls("nist")[0].category, "General");
        assert_eq!(catalog.controls("nist")[0].priority, Priority::Medium);
        // Untouched frameworks keep built-ins
        assert!(catalog.controls("iso27001").len() > 5);
    }

    #[test]
    fn test_load_dir_malformed_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gdpr.json"), "{not json").unwrap();
        assert!(FrameworkCatalog::load_dir(dir.path()).is_err());
    }
}
