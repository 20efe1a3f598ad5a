use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{AccountType, Category, FundingLimits, RiskLevel, Transaction, Tranche, GROSS};

/// More than this many medium-risk lines raises the overall risk to medium.
const MEDIUM_RISK_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TrancheUsage {
    pub(crate) received: Decimal,
    pub(crate) spent: Decimal,
}

/// Grant position derived from the session's transactions. Never stored;
/// recompute with [`summarize`] whenever the inputs change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AtlSummary {
    pub(crate) total_sanctioned: Decimal,
    pub(crate) total_utilized: Decimal,
    pub(crate) non_recurring_utilized: Decimal,
    pub(crate) recurring_utilized: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) interest_earned: Decimal,
    pub(crate) risk: RiskLevel,
    pub(crate) tranche_breakdown: BTreeMap<Tranche, TrancheUsage>,
}

impl AtlSummary {
    /// Share of the sanction already spent, in percent. Zero when nothing
    /// was sanctioned.
    pub(crate) fn utilization_percent(&self) -> Decimal {
        if self.total_sanctioned <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_utilized / self.total_sanctioned * Decimal::ONE_HUNDRED
    }

    pub(crate) fn tranche(&self, tranche: Tranche) -> TrancheUsage {
        self.tranche_breakdown
            .get(&tranche)
            .copied()
            .unwrap_or_default()
    }
}

/// Fold the transaction list into an [`AtlSummary`] for the given account type.
pub(crate) fn summarize(transactions: &[Transaction], account_type: AccountType) -> AtlSummary {
    let limits = FundingLimits::for_account(account_type);

    let mut tranche_breakdown: BTreeMap<Tranche, TrancheUsage> = Tranche::all()
        .iter()
        .map(|t| {
            (
                *t,
                TrancheUsage {
                    received: limits.tranche_amount(*t),
                    spent: Decimal::ZERO,
                },
            )
        })
        .collect();

    let mut total_utilized = Decimal::ZERO;
    let mut non_recurring_utilized = Decimal::ZERO;
    let mut recurring_utilized = Decimal::ZERO;
    let mut interest_earned = Decimal::ZERO;
    let mut high_count = 0usize;
    let mut medium_count = 0usize;

    for txn in transactions {
        match txn.risk {
            RiskLevel::High => high_count += 1,
            RiskLevel::Medium => medium_count += 1,
            RiskLevel::Low => {}
        }

        if txn.is_utilisation() {
            total_utilized = total_utilized.saturating_add(txn.amount);
            match txn.category {
                Category::NonRecurring => {
                    non_recurring_utilized = non_recurring_utilized.saturating_add(txn.amount)
                }
                Category::Recurring => {
                    recurring_utilized = recurring_utilized.saturating_add(txn.amount)
                }
                _ => {}
            }
            // Unrecognised tranche labels are left out of the breakdown
            if let Some(usage) = txn.tranche.and_then(|t| tranche_breakdown.get_mut(&t)) {
                usage.spent = usage.spent.saturating_add(txn.amount);
            }
        }

        if txn.is_receipt() && txn.category == Category::Interest {
            interest_earned = interest_earned.saturating_add(txn.amount);
        }
    }

    let overspent_non_recurring = non_recurring_utilized > limits.t1_non_recurring;
    let risk = if high_count > 0 || overspent_non_recurring {
        RiskLevel::High
    } else if medium_count > MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    AtlSummary {
        total_sanctioned: GROSS.total,
        total_utilized,
        non_recurring_utilized,
        recurring_utilized,
        balance: limits
            .received_total()
            .saturating_add(interest_earned)
            .saturating_sub(total_utilized),
        interest_earned,
        risk,
        tranche_breakdown,
    }
}
