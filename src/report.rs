use chrono::{Datelike, NaiveDate};

use crate::models::{AuditObservation, ComplianceCheck, Transaction};
use crate::summary::AtlSummary;
use crate::ui::util::{format_inr, truncate};

pub(crate) const BRAND_HEADER: &str =
    "Prepared with STEMROBO Technologies - ATL Compliance Assistant";
pub(crate) const BRAND_FOOTER: &str = "STEMROBO Technologies | ATL PFMS Audit Support";

/// Transactions listed in the evidence map.
pub(crate) const EVIDENCE_LIMIT: usize = 15;

const WIDTH: usize = 72;

/// Indian financial year (April to March) containing `date`, e.g. `FY 2023-24`.
pub(crate) fn financial_year_label(date: NaiveDate) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("FY {}-{:02}", start, (start + 1).rem_euclid(100))
}

pub(crate) fn current_financial_year() -> String {
    financial_year_label(chrono::Local::now().date_naive())
}

fn rule(c: char) -> String {
    c.to_string().repeat(WIDTH)
}

/// Greedy word wrap at `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn amount_row(label: &str, amount: &str) -> String {
    let pad = WIDTH.saturating_sub(label.chars().count() + amount.chars().count() + 5);
    format!("| {label}{} {amount} |", " ".repeat(pad))
}

/// FORM GFR 12-A utilisation certificate as plain text.
pub(crate) fn utilisation_certificate(summary: &AtlSummary, school_name: &str, fy: &str) -> String {
    let mut out = vec![
        BRAND_HEADER.to_string(),
        rule('='),
        "FORM GFR 12-A".to_string(),
        format!("Utilisation Certificate (UC)  {fy}"),
        rule('='),
        String::new(),
    ];

    let statement = format!(
        "Certified that out of {} sanctioned for {}, a sum of {} has been utilized. \
         The unspent balance of {} is being carried forward / refunded.",
        format_inr(summary.total_sanctioned),
        school_name,
        format_inr(summary.total_utilized),
        format_inr(summary.balance),
    );
    out.extend(wrap(&statement, WIDTH));
    out.push(String::new());

    let border = format!("+{}+", "-".repeat(WIDTH - 2));
    out.push(border.clone());
    out.push(amount_row("Component", "Amount (INR)"));
    out.push(border.clone());
    out.push(amount_row(
        "Grant General (Recurring)",
        &format_inr(summary.recurring_utilized),
    ));
    out.push(amount_row(
        "Capital Assets (Non-Recurring)",
        &format_inr(summary.non_recurring_utilized),
    ));
    out.push(amount_row("Interest Earned", &format_inr(summary.interest_earned)));
    out.push(border.clone());
    out.push(amount_row("Total Utilization", &format_inr(summary.total_utilized)));
    out.push(border);

    out.push(String::new());
    out.push(String::new());
    let sign = "_".repeat(20);
    out.push(format!("{sign}{}{sign}", " ".repeat(WIDTH - 40)));
    out.push(format!(
        "{:<20}{}{:>20}",
        "Principal Seal",
        " ".repeat(WIDTH - 40),
        "CA Signature"
    ));
    out.join("\n")
}

/// Checklist, observations and evidence map as plain text.
pub(crate) fn audit_intelligence_report(
    transactions: &[Transaction],
    observations: &[AuditObservation],
    checklist: &[ComplianceCheck],
) -> String {
    let mut out = vec![
        "AUDIT INTELLIGENCE SUMMARY".to_string(),
        rule('='),
        String::new(),
        "COMPLIANCE CHECKLIST".to_string(),
        rule('-'),
    ];
    if checklist.is_empty() {
        out.push("  No checklist items.".to_string());
    }
    for check in checklist {
        out.push(format!("  {} {}", check.status.mark(), check.label));
        if !check.comment.is_empty() {
            out.extend(wrap(&check.comment, WIDTH - 6).into_iter().map(|l| format!("      {l}")));
        }
    }

    out.push(String::new());
    out.push("RISK OBSERVATIONS".to_string());
    out.push(rule('-'));
    if observations.is_empty() {
        out.push("  No observations.".to_string());
    }
    for obs in observations {
        out.push(format!("  [{}] {}", obs.severity, obs.kind.as_str().to_uppercase()));
        out.extend(wrap(&obs.observation, WIDTH - 4).into_iter().map(|l| format!("    {l}")));
        if !obs.recommendation.is_empty() {
            out.extend(
                wrap(&format!("Rec: {}", obs.recommendation), WIDTH - 4)
                    .into_iter()
                    .map(|l| format!("    {l}")),
            );
        }
    }

    out.push(String::new());
    out.push("EVIDENCE & TRACEABILITY MAP".to_string());
    out.push(rule('-'));
    out.push(format!(
        "{:<12} {:<36} {:<10} {:>8}",
        "Ref/Date", "Evidence/Narration", "Status", "Risk"
    ));
    out.push(rule('-'));
    if transactions.is_empty() {
        out.push("  No transactions analyzed yet.".to_string());
    }
    for txn in transactions.iter().take(EVIDENCE_LIMIT) {
        out.push(format!(
            "{:<12} {:<36} {:<10} {:>8}",
            truncate(&txn.date, 12),
            truncate(&txn.narration, 36),
            txn.verification.as_str(),
            txn.risk.as_str(),
        ));
        out.push(format!(
            "{:<12} Voucher: {} | GST: {}",
            "",
            txn.voucher_no.as_deref().unwrap_or("N/A"),
            txn.gst_no.as_deref().unwrap_or("N/A"),
        ));
    }
    if transactions.len() > EVIDENCE_LIMIT {
        out.push(format!(
            "  ... {} more transaction(s) not shown",
            transactions.len() - EVIDENCE_LIMIT
        ));
    }

    out.push(String::new());
    out.push(BRAND_FOOTER.to_uppercase());
    out.join("\n")
}

/// Both reports, separated, for export.
pub(crate) fn full_report(
    summary: &AtlSummary,
    school_name: &str,
    fy: &str,
    transactions: &[Transaction],
    observations: &[AuditObservation],
    checklist: &[ComplianceCheck],
) -> String {
    format!(
        "{}\n\n\n{}\n",
        utilisation_certificate(summary, school_name, fy),
        audit_intelligence_report(transactions, observations, checklist)
    )
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
