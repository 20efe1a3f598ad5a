use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 13] = [
    "id",
    "date",
    "financial_year",
    "narration",
    "type",
    "amount",
    "category",
    "tranche",
    "risk",
    "verification",
    "flag_reason",
    "voucher_no",
    "gst_no",
];

/// Write the registry to `path` as CSV. Returns the number of rows written.
pub(crate) fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    writer.write_record(HEADER)?;

    for txn in transactions {
        let amount = txn.amount.to_string();
        writer.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.financial_year.as_str(),
            txn.narration.as_str(),
            txn.direction.as_str(),
            amount.as_str(),
            txn.category.as_str(),
            txn.tranche_label(),
            txn.risk.as_str(),
            txn.verification.as_str(),
            txn.flag_reason.as_deref().unwrap_or(""),
            txn.voucher_no.as_deref().unwrap_or(""),
            txn.gst_no.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = transactions.len(), "exported registry");
    Ok(transactions.len())
}

/// Expand a leading `~/` to `$HOME`.
pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::analysis::AnalysisResult;

    fn transactions() -> Vec<Transaction> {
        let batch: AnalysisResult = serde_json::from_str(
            r#"{"transactions": [
                {"id": "txn-1-0", "date": "05-05-2023", "narration": "Arduino kits, sensors",
                 "amount": 62000, "type": "Debit", "category": "Non-Recurring",
                 "tranche": "Tranche 1", "financialYear": "2023-24",
                 "riskScore": "LOW", "verificationStatus": "Verified", "voucherNo": "V-9"},
                {"id": "txn-1-1", "date": "30-09-2023", "narration": "SB interest",
                 "amount": 1210.5, "type": "Credit", "category": "Interest/Refund",
                 "tranche": "Phase X", "riskScore": "LOW", "verificationStatus": "Verified"}
            ]}"#,
        )
        .unwrap();
        batch.transactions
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.csv");
        let count = export_csv(&path, &transactions()).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), HEADER.len());
        assert_eq!(&headers[0], "id");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "Arduino kits, sensors");
        assert_eq!(&rows[0][4], "Debit");
        assert_eq!(&rows[0][7], "Tranche 1");
        assert_eq!(&rows[0][11], "V-9");
        assert_eq!(&rows[1][5], "1210.5");
        assert_eq!(&rows[1][7], "—");
    }

    #[test]
    fn test_export_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(export_csv(&path, &[]).unwrap(), 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_export_bad_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = export_csv(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to create export file"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/uc.txt"), "/tmp/uc.txt");
        assert_eq!(expand_home("reports/uc.txt"), "reports/uc.txt");
        assert!(!expand_home("~/uc.txt").starts_with('~'));
    }
}
