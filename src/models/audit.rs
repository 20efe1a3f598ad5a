use serde::Deserialize;

use super::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ObservationKind {
    Compliance,
    Documentation,
    Financial,
}

impl ObservationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliance => "Compliance",
            Self::Documentation => "Documentation",
            Self::Financial => "Financial",
        }
    }
}

/// Auditor remark produced by the analysis service. Displayed as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditObservation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
    pub severity: RiskLevel,
    pub observation: String,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    Warning,
    #[serde(rename = "Non-Compliant", alias = "NonCompliant")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Warning => "Warning",
            Self::NonCompliant => "Non-Compliant",
        }
    }

    pub fn mark(&self) -> &'static str {
        match self {
            Self::Compliant => "✔",
            Self::Warning => "⚠",
            Self::NonCompliant => "❌",
        }
    }
}

/// One line of the compliance checklist. Displayed as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComplianceCheck {
    pub label: String,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub comment: String,
}
