//! ISO/IEC 27001 catalog data

use super::{CiaPillar, Control, Priority, RequiredSection};

/// Mandatory ISO 27001 sections (management clauses 4-10 plus Annex A
/// highlight controls)
pub fn required_sections() -> Vec<RequiredSection> {
    vec![
        RequiredSection {
            clause_id: "4.1",
            title: "Context of the Organization",
            keywords: &["context", "organization", "organizational context", "internal issues", "external issues"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "4.2",
            title: "Interested Parties",
            keywords: &["interested parties", "stakeholders", "requirements of interested"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "4.3",
            title: "Scope of the ISMS",
            keywords: &["scope", "isms scope", "information security management system scope", "boundaries"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "5.1",
            title: "Leadership and Commitment",
            keywords: &["leadership", "management commitment", "top management", "leadership commitment"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "5.2",
            title: "Information Security Policy",
            keywords: &["information security policy", "security policy", "policy statement"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "5.3",
            title: "Roles and Responsibilities",
            keywords: &["roles", "responsibilities", "security roles", "information security roles"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "6.1.1",
            title: "Actions to Address Risks – General",
            keywords: &["risk", "risks and opportunities", "address risks"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "6.1.2",
            title: "Risk Assessment",
            keywords: &["risk assessment", "risk assessment methodology", "risk criteria", "risk analysis", "risk evaluation", "likelihood", "impact"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "6.1.3",
            title: "Risk Treatment",
            keywords: &["risk treatment", "risk treatment plan", "risk mitigation", "risk acceptance", "risk owner"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "6.2",
            title: "Information Security Objectives",
            keywords: &["security objectives", "information security objectives", "measurable objectives"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.1",
            title: "Resources",
            keywords: &["resources", "resource allocation", "budget"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.2",
            title: "Competence",
            keywords: &["competence", "training", "awareness training", "skill", "qualification"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.3",
            title: "Awareness",
            keywords: &["awareness", "security awareness", "awareness programme"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.5",
            title: "Documented Information",
            keywords: &["documented information", "documentation", "document control", "records"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "8.1",
            title: "Operational Planning and Control",
            keywords: &["operational planning", "operational control"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "8.2",
            title: "Risk Assessment Execution",
            keywords: &["risk assessment", "perform risk assessment", "risk register"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "8.3",
            title: "Risk Treatment Execution",
            keywords: &["risk treatment plan", "implement risk treatment"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "9.1",
            title: "Monitoring, Measurement, Analysis",
            keywords: &["monitoring", "measurement", "analysis", "evaluation", "performance evaluation"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "9.2",
            title: "Internal Audit",
            keywords: &["internal audit", "audit programme", "audit plan"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "9.3",
            title: "Management Review",
            keywords: &["management review", "review output", "review input"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "10.1",
            title: "Nonconformity and Corrective Action",
            keywords: &["nonconformity", "corrective action", "corrective"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "10.2",
            title: "Continual Improvement",
            keywords: &["continual improvement", "continuous improvement", "improvement"],
            mandatory: true,
            cia_pillar: None,
        },
        // Annex A highlight controls
        RequiredSection {
            clause_id: "A.5",
            title: "Information Security Policies",
            keywords: &["information security policies", "policy for information security", "policies for information security"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.6",
            title: "Organization of Information Security",
            keywords: &["organization of information security", "mobile devices", "teleworking"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "A.7",
            title: "Human Resource Security",
            keywords: &["human resource", "screening", "terms of employment", "disciplinary process", "termination"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.8",
            title: "Asset Management",
            keywords: &["asset management", "asset inventory", "acceptable use", "classification", "media handling"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.9",
            title: "Access Control",
            keywords: &["access control", "access policy", "user access management", "authentication", "authorization", "privilege"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.10",
            title: "Cryptography",
            keywords: &["cryptography", "encryption", "cryptographic controls", "key management"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.12",
            title: "Operations Security",
            keywords: &["operations security", "change management", "capacity management", "malware", "backup", "logging", "monitoring"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "A.13",
            title: "Communications Security",
            keywords: &["communications security", "network security", "information transfer", "network controls"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "A.16",
            title: "Incident Management",
            keywords: &["incident management", "incident response", "security incident", "incident reporting", "incident procedure"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "A.17",
            title: "Business Continuity",
            keywords: &["business continuity", "disaster recovery", "continuity plan", "bcp", "drp", "recovery"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "A.18",
            title: "Compliance",
            keywords: &["compliance", "legal requirements", "regulatory", "privacy", "intellectual property"],
            mandatory: true,
            cia_pillar: None,
        },
    ]
}

/// ISO 27001 reference controls for semantic matching
pub fn controls() -> Vec<Control> {
    vec![
        Control::new(
            "A.5.1",
            "Information Security Policies",
            "Policies for information security shall be defined, approved by management, published and communicated to employees and relevant external parties.",
            "Organizational",
            Priority::Critical,
        ),
        Control::new(
            "A.6.1",
            "Security Roles and Responsibilities",
            "All information security responsibilities shall be defined and allocated, with segregation of conflicting duties.",
            "Organizational",
            Priority::High,
        ),
        Control::new(
            "A.7.2",
            "Security Awareness and Training",
            "All employees and contractors shall receive appropriate awareness education and training and regular updates in organizational policies and procedures.",
            "People",
            Priority::Medium,
        ),
        Control::new(
            "A.8.1",
            "Asset Inventory and Ownership",
            "Assets associated with information and information processing facilities shall be identified and an inventory of these assets shall be drawn up and maintained.",
            "Asset Management",
            Priority::High,
        ),
        Control::new(
            "A.8.2",
            "Information Classification",
            "Information shall be classified in terms of legal requirements, value, criticality and sensitivity to unauthorised disclosure or modification.",
            "Asset Management",
            Priority::Medium,
        ),
        Control::new(
            "A.9.1",
            "Access Control Policy",
            "An access control policy shall be established, documented and reviewed based on business and information security requirements, limiting access to authorized users.",
            "Access Control",
            Priority::Critical,
        ),
        Control::new(
            "A.9.4",
            "User Authentication",
            "Access to systems and applications shall be controlled by a secure log-on procedure with strong authentication and password management.",
            "Access Control",
            Priority::Critical,
        ),
        Control::new(
            "A.10.1",
            "Cryptographic Controls",
            "A policy on the use of cryptographic controls for protection of information shall be developed and implemented, including encryption and key management.",
            "Cryptography",
            Priority::High,
        ),
        Control::new(
            "A.12.3",
            "Information Backup",
            "Backup copies of information, software and system images shall be taken and tested regularly in accordance with an agreed backup policy.",
            "Operations Security",
            Priority::High,
        ),
        Control::new(
            "A.12.4",
            "Logging and Monitoring",
            "Event logs recording user activities, exceptions, faults and information security events shall be produced, kept and regularly reviewed.",
            "Operations Security",
            Priority::Medium,
        ),
        Control::new(
            "A.16.1",
            "Incident Response",
            "Management responsibilities and procedures shall be established to ensure a quick, effective and orderly response to information security incidents.",
            "Incident Management",
            Priority::Critical,
        ),
        Control::new(
            "A.17.1",
            "Business Continuity Planning",
            "The organization shall determine its requirements for information security and continuity of information security management in adverse situations, including disaster recovery.",
            "Business Continuity",
            Priority::High,
        ),
        Control::new(
            "A.18.1",
            "Compliance with Legal Requirements",
            "All relevant legislative statutory, regulatory and contractual requirements shall be explicitly identified, documented and kept up to date.",
            "Compliance",
            Priority::Medium,
        ),
        Control::new(
            "6.1.2",
            "Information Security Risk Assessment",
            "The organization shall define and apply an information security risk assessment process that establishes risk criteria, identifies risks and analyses likelihood and impact.",
            "Risk Management",
            Priority::Critical,
        ),
    ]
}
