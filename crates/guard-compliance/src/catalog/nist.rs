//! NIST Cybersecurity Framework catalog data

use super::{CiaPillar, Control, Priority, RequiredSection};

/// Mandatory NIST CSF outcome categories
pub fn required_sections() -> Vec<RequiredSection> {
    vec![
        RequiredSection {
            clause_id: "GV.OC",
            title: "Organizational Context",
            keywords: &["organizational context", "mission", "stakeholder expectations"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "GV.RM",
            title: "Risk Management Strategy",
            keywords: &["risk management strategy", "risk appetite", "risk tolerance"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "GV.SC",
            title: "Supply Chain Risk Management",
            keywords: &["supply chain", "third party", "vendor risk"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "ID.AM",
            title: "Asset Management",
            keywords: &["asset management", "asset inventory", "hardware", "software inventory"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "ID.RA",
            title: "Risk Assessment",
            keywords: &["risk assessment", "threat", "vulnerability", "likelihood", "impact"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "PR.AA",
            title: "Identity Management & Access Control",
            keywords: &["identity management", "access control", "authentication", "credential", "privilege"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "PR.AT",
            title: "Awareness and Training",
            keywords: &["awareness", "training", "security training"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "PR.DS",
            title: "Data Security",
            keywords: &["data security", "data protection", "encryption", "data at rest", "data in transit"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Confidentiality),
        },
        RequiredSection {
            clause_id: "PR.PS",
            title: "Platform Security",
            keywords: &["platform security", "configuration", "hardening", "baseline"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "DE.CM",
            title: "Continuous Monitoring",
            keywords: &["continuous monitoring", "monitoring", "detection", "anomaly", "logging", "audit log"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Integrity),
        },
        RequiredSection {
            clause_id: "DE.AE",
            title: "Adverse Event Analysis",
            keywords: &["adverse event", "event analysis", "alert", "indicator"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "RS.MA",
            title: "Incident Management",
            keywords: &["incident management", "incident response", "response plan"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
        RequiredSection {
            clause_id: "RS.CO",
            title: "Incident Communication",
            keywords: &["incident communication", "notification", "reporting"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "RC.RP",
            title: "Recovery Planning",
            keywords: &["recovery plan", "disaster recovery", "business continuity", "restoration"],
            mandatory: true,
            cia_pillar: Some(CiaPillar::Availability),
        },
    ]
}

/// NIST CSF reference controls for semantic matching
pub fn controls() -> Vec<Control> {
    vec![
        Control::new(
            "GV.RM-01",
            "Risk Management Objectives",
            "Risk management objectives shall be established and agreed to by organizational stakeholders, including risk appetite and risk tolerance statements.",
            "Govern",
            Priority::High,
        ),
        Control::new(
            "ID.AM-01",
            "Hardware and Software Inventory",
            "Inventories of hardware, software, services and systems managed by the organization shall be maintained and kept current.",
            "Identify",
            Priority::High,
        ),
        Control::new(
            "ID.RA-01",
            "Vulnerability Identification",
            "Vulnerabilities in organizational assets shall be identified, validated and recorded, with threats and likelihood analysed to inform risk assessment.",
            "Identify",
            Priority::Critical,
        ),
        Control::new(
            "PR.AA-01",
            "Identity and Credential Management",
            "Identities and credentials for authorized users, services and hardware shall be managed, with authentication commensurate with the risk of the transaction.",
            "Protect",
            Priority::Critical,
        ),
        Control::new(
            "PR.DS-01",
            "Data-at-Rest Protection",
            "The confidentiality, integrity and availability of data at rest shall be protected through encryption and access restrictions.",
            "Protect",
            Priority::Critical,
        ),
        Control::new(
            "PR.AT-01",
            "Security Awareness Training",
            "Personnel shall be provided with security awareness and training so that they possess the knowledge and skills to perform relevant tasks.",
            "Protect",
            Priority::Medium,
        ),
        Control::new(
            "DE.CM-01",
            "Network Monitoring",
            "Networks and network services shall be monitored continuously to find potentially adverse events, including anomaly detection and audit logging.",
            "Detect",
            Priority::High,
        ),
        Control::new(
            "RS.MA-01",
            "Incident Response Execution",
            "The incident response plan shall be executed in coordination with relevant third parties once an incident is declared.",
            "Respond",
            Priority::Critical,
        ),
        Control::new(
            "RS.CO-02",
            "Incident Reporting",
            "Internal and external stakeholders shall be notified of incidents consistent with response plans and regulatory reporting obligations.",
            "Respond",
            Priority::Medium,
        ),
        Control::new(
            "RC.RP-01",
            "Recovery Plan Execution",
            "The recovery portion of the incident response plan shall be executed, with restoration of systems and verification of backup integrity before use.",
            "Recover",
            Priority::High,
        ),
    ]
}
