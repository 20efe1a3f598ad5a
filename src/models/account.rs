use serde::{Deserialize, Serialize};

/// Bank account the grant is held in. Selects which funding-limit table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Current => "Current",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" | "s" => Some(Self::Savings),
            "current" | "current (tds)" | "tds" | "c" => Some(Self::Current),
            _ => None,
        }
    }

    pub fn all() -> &'static [AccountType] {
        &[Self::Savings, Self::Current]
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Savings => Self::Current,
            Self::Current => Self::Savings,
        }
    }

    /// Label used on headers, e.g. "CURRENT (TDS)".
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Savings => "SAVINGS",
            Self::Current => "CURRENT (TDS)",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit perspective requested from the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    Auditor,
    #[default]
    School,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auditor => "Auditor",
            Self::School => "School",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auditor" | "audit" | "a" => Some(Self::Auditor),
            "school" | "s" => Some(Self::School),
            _ => None,
        }
    }

    pub fn all() -> &'static [Mode] {
        &[Self::Auditor, Self::School]
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Auditor => Self::School,
            Self::School => Self::Auditor,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
