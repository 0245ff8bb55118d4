//! GDPR catalog data

use super::{CiaPillar, Control, Priority, RequiredSection};

/// Mandatory GDPR articles a processing policy must address
pub fn required_sections() -> Vec<RequiredSection> {
    vec![
        RequiredSection {
            clause_id: "Art.5",
            title: "Principles of Data Processing",
            keywords: &["lawfulness", "fairness", "transparency", "purpose limitation", "data minimisation", "accuracy", "storage limitation"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.6",
            title: "Lawful Basis for Processing",
            keywords: &["lawful basis", "consent", "legitimate interest", "legal obligation", "contractual necessity"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.13",
            title: "Transparency / Privacy Notice",
            keywords: &["privacy notice", "transparency", "data subject information", "inform data subject"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.15",
            title: "Right of Access",
            keywords: &["right of access", "subject access request", "data access"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "Art.17",
            title: "Right to Erasure",
            keywords: &["right to erasure", "right to be forgotten", "data deletion"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.25",
            title: "Data Protection by Design",
            keywords: &["data protection by design", "privacy by design", "by default"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.30",
            title: "Records of Processing",
            keywords: &["records of processing", "processing register", "processing activities"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "Art.32",
            title: "Security of Processing",
            keywords: &["security of processing", "technical measures", "organisational measures", "pseudonymisation", "encryption"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "Art.33",
            title: "Breach Notification to Authority",
            keywords: &["breach notification", "data breach", "notify authority", "72 hours"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "Art.35",
            title: "Data Protection Impact Assessment",
            keywords: &["data protection impact assessment", "dpia", "impact assessment", "privacy impact"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "Art.37",
            title: "Data Protection Officer",
            keywords: &["data protection officer", "dpo"],
            mandatory: true,
            cia_pillar: None,
        },
    ]
}

/// GDPR reference controls for semantic matching
pub fn controls() -> Vec<Control> {
    vec![
        Control::new(
            "Art.5",
            "Processing Principles",
            "Personal data shall be processed lawfully, fairly and transparently, collected for specified purposes, minimised, accurate, and kept no longer than necessary.",
            "Principles",
            Priority::Critical,
        ),
        Control::new(
            "Art.6",
            "Lawful Basis",
            "Processing shall be lawful only where a lawful basis applies, such as consent, contract, legal obligation or legitimate interest.",
            "Principles",
            Priority::Critical,
        ),
        Control::new(
            "Art.13",
            "Privacy Notice",
            "Data subjects shall be informed at collection time of the controller identity, processing purposes, lawful basis, recipients and retention periods.",
            "Transparency",
            Priority::High,
        ),
        Control::new(
            "Art.15",
            "Subject Access",
            "Data subjects shall have the right to obtain confirmation of processing and access to their personal data through subject access requests.",
            "Data Subject Rights",
            Priority::High,
        ),
        Control::new(
            "Art.17",
            "Erasure",
            "Data subjects shall have the right to erasure of personal data without undue delay where processing grounds no longer apply.",
            "Data Subject Rights",
            Priority::High,
        ),
        Control::new(
            "Art.25",
            "Protection by Design and Default",
            "The controller shall implement data protection by design and by default through appropriate technical and organisational measures such as pseudonymisation and minimisation.",
            "Accountability",
            Priority::Medium,
        ),
        Control::new(
            "Art.30",
            "Records of Processing Activities",
            "Each controller shall maintain a record of processing activities covering purposes, categories of data, recipients and retention schedules.",
            "Accountability",
            Priority::Medium,
        ),
        Control::new(
            "Art.32",
            "Security of Processing",
            "The controller and processor shall implement appropriate technical and organisational measures to ensure security, including encryption, pseudonymisation, resilience and regular testing.",
            "Security",
            Priority::Critical,
        ),
        Control::new(
            "Art.33",
            "Breach Notification",
            "In the case of a personal data breach the controller shall notify the supervisory authority without undue delay and within 72 hours where feasible.",
            "Security",
            Priority::Critical,
        ),
        Control::new(
            "Art.35",
            "Impact Assessment",
            "Where processing is likely to result in high risk to individuals, the controller shall carry out a data protection impact assessment prior to processing.",
            "Accountability",
            Priority::High,
        ),
    ]
}
