use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::{Category, Direction, RiskLevel, Tranche, VerificationStatus};

/// One classified ledger line, as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned locally when the batch is applied to the session.
    #[serde(default)]
    pub id: String,
    pub date: String,
    pub narration: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub category: Category,
    /// `None` when the service sent a tranche label we do not recognise.
    #[serde(default = "unassigned", deserialize_with = "lenient_tranche")]
    pub tranche: Option<Tranche>,
    #[serde(default)]
    pub financial_year: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: Option<String>,
    #[serde(rename = "riskScore")]
    pub risk: RiskLevel,
    #[serde(rename = "verificationStatus")]
    pub verification: VerificationStatus,
    #[serde(default)]
    pub voucher_no: Option<String>,
    #[serde(default)]
    pub gst_no: Option<String>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// Counts toward grant utilisation.
    pub fn is_utilisation(&self) -> bool {
        self.is_debit() && self.category != Category::Ineligible
    }

    /// Counts toward receipts (credits, interest, grant inflows).
    pub fn is_receipt(&self) -> bool {
        self.direction == Direction::Credit || self.category.is_receipt()
    }

    /// Amount with a leading sign for display: `-` for debits, `+` otherwise.
    pub fn sign(&self) -> &'static str {
        if self.is_debit() {
            "-"
        } else {
            "+"
        }
    }

    pub fn tranche_label(&self) -> &str {
        self.tranche.map(|t| t.as_str()).unwrap_or("—")
    }
}

fn unassigned() -> Option<Tranche> {
    Some(Tranche::Unassigned)
}

fn lenient_tranche<'de, D>(deserializer: D) -> Result<Option<Tranche>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(label) => {
            let parsed = Tranche::parse(&label);
            if parsed.is_none() {
                tracing::warn!(label = %label, "unrecognised tranche label, excluded from breakdown");
            }
            parsed
        }
        None => Some(Tranche::Unassigned),
    })
}
