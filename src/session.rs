use rust_decimal::Decimal;

use crate::analysis::AnalysisResult;
use crate::models::{AccountType, AuditObservation, ComplianceCheck, Transaction};
use crate::summary::{summarize, AtlSummary};

/// In-memory registry for one run of the program. Transactions are only
/// ever appended in whole batches or purged; nothing is written to disk.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    transactions: Vec<Transaction>,
    observations: Vec<AuditObservation>,
    checklist: Vec<ComplianceCheck>,
    next_seq: u64,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn observations(&self) -> &[AuditObservation] {
        &self.observations
    }

    pub(crate) fn checklist(&self) -> &[ComplianceCheck] {
        &self.checklist
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Apply a full analysis batch: transactions are appended with fresh
    /// local ids, observations and checklist replace the previous ones.
    /// Returns the number of transactions added.
    pub(crate) fn apply(&mut self, result: AnalysisResult) -> usize {
        let stamp = chrono::Utc::now().timestamp_millis();
        let added = result.transactions.len();

        for mut txn in result.transactions {
            if txn.amount < Decimal::ZERO {
                tracing::warn!(
                    narration = %txn.narration,
                    amount = %txn.amount,
                    "negative amount from analysis service, using absolute value"
                );
                txn.amount = txn.amount.abs();
            }
            txn.id = format!("txn-{stamp}-{}", self.next_seq);
            self.next_seq += 1;
            self.transactions.push(txn);
        }

        self.observations = result.observations;
        self.checklist = result.compliance_checklist;

        tracing::info!(
            added,
            total = self.transactions.len(),
            observations = self.observations.len(),
            checks = self.checklist.len(),
            "applied analysis batch"
        );
        added
    }

    /// Drop every transaction, observation and checklist entry.
    pub(crate) fn purge(&mut self) -> usize {
        let removed = self.transactions.len();
        self.transactions.clear();
        self.observations.clear();
        self.checklist.clear();
        tracing::info!(removed, "purged session registry");
        removed
    }

    pub(crate) fn summary(&self, account_type: AccountType) -> AtlSummary {
        summarize(&self.transactions, account_type)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
