//! ISO 9001 catalog data

use super::{Control, Priority, RequiredSection};

/// Mandatory ISO 9001 sections (quality management clauses)
pub fn required_sections() -> Vec<RequiredSection> {
    vec![
        RequiredSection {
            clause_id: "4.1",
            title: "Context of the Organization",
            keywords: &["context", "organization context", "internal issues", "external issues"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "5.2",
            title: "Quality Policy",
            keywords: &["quality policy", "policy statement"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "6.1",
            title: "Actions to Address Risks",
            keywords: &["risk", "opportunity", "risk-based thinking"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "6.2",
            title: "Quality Objectives",
            keywords: &["quality objectives", "measurable objectives"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.1",
            title: "Resources",
            keywords: &["resources", "infrastructure", "environment for operation"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "7.2",
            title: "Competence",
            keywords: &["competence", "training", "education", "experience"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "8.1",
            title: "Operational Planning and Control",
            keywords: &["operational planning", "operational control", "process"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "9.1",
            title: "Monitoring, Measurement, Analysis",
            keywords: &["monitoring", "measurement", "analysis", "evaluation"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "9.2",
            title: "Internal Audit",
            keywords: &["internal audit", "audit programme"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "9.3",
            title: "Management Review",
            keywords: &["management review"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "10.2",
            title: "Nonconformity and Corrective Action",
            keywords: &["nonconformity", "corrective action"],
            mandatory: true,
            cia_pillar: None,
        },
        RequiredSection {
            clause_id: "10.3",
            title: "Continual Improvement",
            keywords: &["continual improvement", "continuous improvement"],
            mandatory: true,
            cia_pillar: None,
        },
    ]
}

/// ISO 9001 reference requirements for semantic matching
pub fn controls() -> Vec<Control> {
    vec![
        Control::new(
            "5.2",
            "Quality Policy",
            "Top management shall establish, implement and maintain a quality policy appropriate to the purpose and context of the organization.",
            "Leadership",
            Priority::Critical,
        ),
        Control::new(
            "6.1",
            "Risks and Opportunities",
            "The organization shall determine the risks and opportunities that need to be addressed to give assurance that the quality management system achieves its intended results.",
            "Planning",
            Priority::High,
        ),
        Control::new(
            "6.2",
            "Quality Objectives",
            "Quality objectives shall be established at relevant functions, be measurable, monitored, communicated and updated as appropriate.",
            "Planning",
            Priority::High,
        ),
        Control::new(
            "7.1.5",
            "Monitoring and Measuring Resources",
            "The organization shall determine and provide the resources needed to ensure valid and reliable monitoring and measuring results.",
            "Support",
            Priority::Medium,
        ),
        Control::new(
            "7.2",
            "Competence",
            "The organization shall determine the necessary competence of persons doing work, ensure competence on the basis of education, training or experience, and retain documented evidence.",
            "Support",
            Priority::Medium,
        ),
        Control::new(
            "8.1",
            "Operational Planning and Control",
            "The organization shall plan, implement and control the processes needed to meet requirements for the provision of products and services.",
            "Operation",
            Priority::High,
        ),
        Control::new(
            "9.1",
            "Monitoring and Evaluation",
            "The organization shall determine what needs to be monitored and measured, the methods for monitoring, measurement, analysis and evaluation, and when results shall be analysed.",
            "Performance Evaluation",
            Priority::High,
        ),
        Control::new(
            "9.2",
            "Internal Audit",
            "The organization shall conduct internal audits at planned intervals to provide information on whether the quality management system conforms to requirements.",
            "Performance Evaluation",
            Priority::Critical,
        ),
        Control::new(
            "9.3",
            "Management Review",
            "Top management shall review the quality management system at planned intervals to ensure its continuing suitability, adequacy, effectiveness and alignment.",
            "Performance Evaluation",
            Priority::Medium,
        ),
        Control::new(
            "10.2",
            "Nonconformity and Corrective Action",
            "When a nonconformity occurs the organization shall react, evaluate the need for action to eliminate its causes, and implement corrective action.",
            "Improvement",
            Priority::High,
        ),
    ]
}
