#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::analysis::AnalysisResult;
use crate::models::AccountType;
use crate::summary::summarize;

fn sample() -> AnalysisResult {
    serde_json::from_str(
        r#"{
            "transactions": [
                {"date": "05-05-2023", "narration": "Arduino kits", "amount": 62000,
                 "type": "Debit", "category": "Non-Recurring", "tranche": "Tranche 1",
                 "riskScore": "LOW", "verificationStatus": "Verified",
                 "voucherNo": "V-101", "gstNo": "29ABCDE1234F1Z5"},
                {"date": "12-08-2023", "narration": "Workshop refreshments", "amount": 4500,
                 "type": "Debit", "category": "Recurring", "tranche": "Tranche 1",
                 "riskScore": "HIGH", "verificationStatus": "Missing"},
                {"date": "30-09-2023", "narration": "SB interest", "amount": 1210,
                 "type": "Credit", "category": "Interest/Refund", "tranche": "None",
                 "riskScore": "LOW", "verificationStatus": "Verified"}
            ],
            "observations": [
                {"type": "Financial", "severity": "HIGH",
                 "observation": "Refreshments booked against the ATL grant",
                 "recommendation": "Reverse the entry"}
            ],
            "complianceChecklist": [
                {"label": "Separate bank account", "status": "Compliant", "comment": "Savings a/c"},
                {"label": "GST invoices", "status": "Warning", "comment": "1 missing"},
                {"label": "UC filed on PFMS", "status": "Non-Compliant"}
            ]
        }"#,
    )
    .unwrap()
}

// ── financial_year_label ──────────────────────────────────────

#[test]
fn test_fy_from_april() {
    let date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
    assert_eq!(financial_year_label(date), "FY 2023-24");
}

#[test]
fn test_fy_before_april_belongs_to_previous_year() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    assert_eq!(financial_year_label(date), "FY 2023-24");
}

#[test]
fn test_fy_century_rollover() {
    let date = NaiveDate::from_ymd_opt(2099, 12, 1).unwrap();
    assert_eq!(financial_year_label(date), "FY 2099-00");
}

// ── utilisation_certificate ───────────────────────────────────

#[test]
fn test_certificate_contents() {
    let batch = sample();
    let summary = summarize(&batch.transactions, AccountType::Savings);
    let uc = utilisation_certificate(&summary, "Central Academy", "FY 2023-24");

    assert!(uc.starts_with(BRAND_HEADER));
    assert!(uc.contains("FORM GFR 12-A"));
    assert!(uc.contains("Utilisation Certificate (UC)  FY 2023-24"));
    assert!(uc.contains("₹20,00,000"));
    assert!(uc.contains("Central Academy"));
    assert!(uc.contains("₹66,500"));
    assert!(uc.contains("Grant General (Recurring)"));
    assert!(uc.contains("₹4,500"));
    assert!(uc.contains("₹62,000"));
    assert!(uc.contains("₹1,210"));
    assert!(uc.contains("Principal Seal"));
    assert!(uc.contains("CA Signature"));
}

#[test]
fn test_certificate_balance_matches_summary() {
    let batch = sample();
    let summary = summarize(&batch.transactions, AccountType::Current);
    assert_eq!(summary.balance, dec!(1894710));
    let uc = utilisation_certificate(&summary, "Central Academy", "FY 2023-24");
    assert!(uc.contains("₹18,94,710"));
}

#[test]
fn test_certificate_table_rows_align() {
    let summary = summarize(&[], AccountType::Savings);
    let uc = utilisation_certificate(&summary, "School", "FY 2024-25");
    let widths: Vec<usize> = uc
        .lines()
        .filter(|l| l.starts_with('|') || l.starts_with('+'))
        .map(|l| l.chars().count())
        .collect();
    assert!(!widths.is_empty());
    assert!(widths.iter().all(|w| *w == widths[0]));
}

// ── audit_intelligence_report ─────────────────────────────────

#[test]
fn test_audit_report_sections() {
    let batch = sample();
    let report = audit_intelligence_report(
        &batch.transactions,
        &batch.observations,
        &batch.compliance_checklist,
    );

    assert!(report.contains("COMPLIANCE CHECKLIST"));
    assert!(report.contains("✔ Separate bank account"));
    assert!(report.contains("⚠ GST invoices"));
    assert!(report.contains("❌ UC filed on PFMS"));
    assert!(report.contains("[HIGH] FINANCIAL"));
    assert!(report.contains("Rec: Reverse the entry"));
    assert!(report.contains("EVIDENCE & TRACEABILITY MAP"));
    assert!(report.contains("Voucher: V-101 | GST: 29ABCDE1234F1Z5"));
    assert!(report.contains("Voucher: N/A | GST: N/A"));
    assert!(report.ends_with(&BRAND_FOOTER.to_uppercase()));
}

#[test]
fn test_audit_report_evidence_limited_to_fifteen() {
    let batch = sample();
    let many: Vec<Transaction> = batch
        .transactions
        .iter()
        .cycle()
        .take(20)
        .cloned()
        .collect();
    let report = audit_intelligence_report(&many, &[], &[]);
    assert_eq!(report.matches("Voucher:").count(), EVIDENCE_LIMIT);
    assert!(report.contains("5 more transaction(s) not shown"));
}

#[test]
fn test_audit_report_empty_session() {
    let report = audit_intelligence_report(&[], &[], &[]);
    assert!(report.contains("No checklist items."));
    assert!(report.contains("No observations."));
    assert!(report.contains("No transactions analyzed yet."));
}

#[test]
fn test_wrap_respects_width() {
    let lines = wrap("one two three four five six seven", 10);
    assert!(lines.iter().all(|l| l.chars().count() <= 10));
    assert_eq!(lines.join(" "), "one two three four five six seven");
}
