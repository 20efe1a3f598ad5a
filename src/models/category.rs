use serde::{Deserialize, Serialize};

/// Expenditure class assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Non-Recurring", alias = "NonRecurring")]
    NonRecurring,
    Recurring,
    Ineligible,
    #[serde(rename = "Interest/Refund", alias = "Interest")]
    Interest,
    #[serde(rename = "Grant Receipt", alias = "GrantReceipt")]
    GrantReceipt,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonRecurring => "Non-Recurring",
            Self::Recurring => "Recurring",
            Self::Ineligible => "Ineligible",
            Self::Interest => "Interest/Refund",
            Self::GrantReceipt => "Grant Receipt",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::NonRecurring,
            Self::Recurring,
            Self::Ineligible,
            Self::Interest,
            Self::GrantReceipt,
        ]
    }

    /// Categories that bring money into the grant account.
    pub fn is_receipt(&self) -> bool {
        matches!(self, Self::Interest | Self::GrantReceipt)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scheduled disbursement a transaction is booked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tranche {
    #[serde(rename = "Tranche 1")]
    Tranche1,
    #[serde(rename = "Tranche 2")]
    Tranche2,
    #[serde(rename = "Tranche 3")]
    Tranche3,
    #[serde(rename = "None")]
    Unassigned,
}

impl Tranche {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tranche1 => "Tranche 1",
            Self::Tranche2 => "Tranche 2",
            Self::Tranche3 => "Tranche 3",
            Self::Unassigned => "None",
        }
    }

    /// Lenient label lookup. Unknown labels yield `None`, which the summary
    /// leaves out of the tranche breakdown.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "tranche 1" | "tranche1" | "t1" => Some(Self::Tranche1),
            "tranche 2" | "tranche2" | "t2" => Some(Self::Tranche2),
            "tranche 3" | "tranche3" | "t3" => Some(Self::Tranche3),
            "none" | "" => Some(Self::Unassigned),
            _ => None,
        }
    }

    pub fn all() -> &'static [Tranche] {
        &[
            Self::Tranche1,
            Self::Tranche2,
            Self::Tranche3,
            Self::Unassigned,
        ]
    }
}

impl std::fmt::Display for Tranche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered so that `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    #[serde(rename = "LOW", alias = "Low")]
    Low,
    #[serde(rename = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(rename = "HIGH", alias = "High")]
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Missing,
    Doubtful,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Missing => "Missing",
            Self::Doubtful => "Doubtful",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
