use rust_decimal::Decimal;

use super::{AccountType, Tranche};

/// One row of the ATL funding table: the sanction and how it is disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingLimits {
    pub name: &'static str,
    pub total: Decimal,
    pub tranche_1: Decimal,
    pub tranche_2: Decimal,
    pub tranche_3: Decimal,
    /// Recurring (operational) sub-cap of tranche 1.
    pub t1_recurring: Decimal,
    /// Non-recurring (capital) sub-cap of tranche 1.
    pub t1_non_recurring: Decimal,
}

/// Gross sanction, held in a savings account.
pub const GROSS: FundingLimits = FundingLimits {
    name: "Gross",
    total: Decimal::from_parts(2_000_000, 0, 0, false, 0),
    tranche_1: Decimal::from_parts(1_200_000, 0, 0, false, 0),
    tranche_2: Decimal::from_parts(400_000, 0, 0, false, 0),
    tranche_3: Decimal::from_parts(400_000, 0, 0, false, 0),
    t1_recurring: Decimal::from_parts(200_000, 0, 0, false, 0),
    t1_non_recurring: Decimal::from_parts(1_000_000, 0, 0, false, 0),
};

/// Sanction net of TDS, held in a current account. TDS comes out of the
/// non-recurring portion only.
pub const NET_WITH_TDS: FundingLimits = FundingLimits {
    name: "Net with TDS",
    total: Decimal::from_parts(1_960_000, 0, 0, false, 0),
    tranche_1: Decimal::from_parts(1_176_000, 0, 0, false, 0),
    tranche_2: Decimal::from_parts(392_000, 0, 0, false, 0),
    tranche_3: Decimal::from_parts(392_000, 0, 0, false, 0),
    t1_recurring: Decimal::from_parts(200_000, 0, 0, false, 0),
    t1_non_recurring: Decimal::from_parts(976_000, 0, 0, false, 0),
};

impl FundingLimits {
    pub fn for_account(account_type: AccountType) -> &'static FundingLimits {
        match account_type {
            AccountType::Savings => &GROSS,
            AccountType::Current => &NET_WITH_TDS,
        }
    }

    /// Scheduled receipt for a tranche. `Unassigned` never receives funds.
    pub fn tranche_amount(&self, tranche: Tranche) -> Decimal {
        match tranche {
            Tranche::Tranche1 => self.tranche_1,
            Tranche::Tranche2 => self.tranche_2,
            Tranche::Tranche3 => self.tranche_3,
            Tranche::Unassigned => Decimal::ZERO,
        }
    }

    pub fn received_total(&self) -> Decimal {
        self.tranche_1 + self.tranche_2 + self.tranche_3
    }
}
