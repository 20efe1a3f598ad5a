use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::analysis::{parse_response, AnalysisResult};
use crate::config::Config;
use crate::export::expand_home;
use crate::models::{
    AccountType, Category, FundingLimits, Mode, Tranche, Transaction, GROSS, NET_WITH_TDS,
};
use crate::pipeline::{Pipeline, Submission};
use crate::report;
use crate::session::SessionState;
use crate::summary::AtlSummary;
use crate::ui::util::{format_inr, format_percent, truncate};

/// Flags that take a value, so their value is never mistaken for a positional.
const VALUE_FLAGS: &[&str] = &["--text", "--mode", "--account", "--school", "--report", "--out"];

pub(crate) fn as_cli(args: &[String], config: &Config, pipeline: Pipeline) -> Result<()> {
    match args[1].as_str() {
        "analyze" | "a" => cli_analyze(&args[2..], config, pipeline),
        "summary" | "s" => cli_summary(&args[2..], config),
        "report" => cli_report(&args[2..], config),
        "limits" => {
            print_limits();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("atlaudit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ATLAudit - Atal Tinkering Lab grant utilisation audit console");
    println!();
    println!("Usage: atlaudit [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  analyze [file]                  Analyze a statement (pdf, image, txt, csv)");
    println!("    --text <text>                 Analyze text instead of a file");
    println!("    --mode <auditor|school>       Audit mode (default from config)");
    println!("    --account <savings|current>   Account type (default from config)");
    println!("    --school <name>               School name for the certificate");
    println!("    --report <path>               Also save the UC and audit report");
    println!("  summary <response.json>         Summarize a saved analysis response");
    println!("    --account <savings|current>");
    println!("  report <response.json>          Render the UC and audit report");
    println!("    --account, --school, --out <path>");
    println!("  limits                          Print the ATL funding table");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

pub(super) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// First argument that is neither a flag nor a flag's value.
pub(super) fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with('-') {
            return Some(arg.as_str());
        }
    }
    None
}

pub(super) fn account_arg(args: &[String], default: AccountType) -> Result<AccountType> {
    match flag_value(args, "--account") {
        Some(value) => AccountType::parse(value)
            .ok_or_else(|| anyhow::anyhow!("Unknown account type '{value}' (savings or current)")),
        None => Ok(default),
    }
}

pub(super) fn mode_arg(args: &[String], default: Mode) -> Result<Mode> {
    match flag_value(args, "--mode") {
        Some(value) => Mode::parse(value)
            .ok_or_else(|| anyhow::anyhow!("Unknown mode '{value}' (auditor or school)")),
        None => Ok(default),
    }
}

fn cli_analyze(args: &[String], config: &Config, mut pipeline: Pipeline) -> Result<()> {
    let mode = mode_arg(args, config.default_mode)?;
    let account_type = account_arg(args, config.default_account_type)?;
    let school = flag_value(args, "--school").unwrap_or(&config.school_name);

    let submission = match (positional(args), flag_value(args, "--text")) {
        (Some(file), _) => {
            let path = PathBuf::from(expand_home(file));
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Submission::file(path, mode, account_type)
        }
        (None, Some(text)) => Submission::text(text, mode, account_type),
        (None, None) => anyhow::bail!(
            "Usage: atlaudit analyze <file> | --text <text> [--mode m] [--account a]"
        ),
    };

    eprintln!("Analyzing ({mode} mode, {})...", account_type.display_label());
    let mut session = SessionState::new();
    let mut last = None;
    let added = pipeline.submit(&submission, &mut session, &mut |pct| {
        if last != Some(pct) {
            eprint!("\rExtracting text... {pct:>3}%");
            last = Some(pct);
        }
    })?;
    if last.is_some() {
        eprintln!();
    }
    eprintln!("Analysis complete: {added} transaction(s)");

    print_session(&session, account_type);

    if let Some(out) = flag_value(args, "--report") {
        let path = PathBuf::from(expand_home(out));
        write_report(&path, &session, account_type, school)?;
        println!();
        println!("Reports saved to {}", path.display());
    }
    Ok(())
}

fn load_response(path: &Path) -> Result<AnalysisResult> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file: {}", path.display()))?;
    let result = parse_response(200, &body)
        .with_context(|| format!("Invalid analysis response: {}", path.display()))?;
    Ok(result)
}

fn session_from_args(args: &[String], usage: &str) -> Result<SessionState> {
    let Some(file) = positional(args) else {
        anyhow::bail!("{usage}");
    };
    let result = load_response(Path::new(&expand_home(file)))?;
    let mut session = SessionState::new();
    session.apply(result);
    Ok(session)
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let account_type = account_arg(args, config.default_account_type)?;
    let session = session_from_args(
        args,
        "Usage: atlaudit summary <response.json> [--account <savings|current>]",
    )?;
    print_session(&session, account_type);
    Ok(())
}

fn cli_report(args: &[String], config: &Config) -> Result<()> {
    let account_type = account_arg(args, config.default_account_type)?;
    let school = flag_value(args, "--school").unwrap_or(&config.school_name);
    let session = session_from_args(
        args,
        "Usage: atlaudit report <response.json> [--account a] [--school s] [--out <path>]",
    )?;

    match flag_value(args, "--out") {
        Some(out) => {
            let path = PathBuf::from(expand_home(out));
            write_report(&path, &session, account_type, school)?;
            println!("Reports saved to {}", path.display());
        }
        None => print!("{}", render_report(&session, account_type, school)),
    }
    Ok(())
}

fn render_report(session: &SessionState, account_type: AccountType, school: &str) -> String {
    report::full_report(
        &session.summary(account_type),
        school,
        &report::current_financial_year(),
        session.transactions(),
        session.observations(),
        session.checklist(),
    )
}

fn write_report(
    path: &Path,
    session: &SessionState,
    account_type: AccountType,
    school: &str,
) -> Result<()> {
    std::fs::write(path, render_report(session, account_type, school))
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn print_session(session: &SessionState, account_type: AccountType) {
    let summary = session.summary(account_type);
    print_summary(&summary, account_type);
    print_tranches(&summary);
    if !session.is_empty() {
        print_categories(session);
        println!();
        print_transactions(session);
    }
}

fn print_categories(session: &SessionState) {
    println!();
    println!("By Category:");
    for category in Category::all() {
        let matching: Vec<&Transaction> = session
            .transactions()
            .iter()
            .filter(|t| t.category == *category)
            .collect();
        if matching.is_empty() {
            continue;
        }
        let total: Decimal = matching.iter().map(|t| t.amount).sum();
        println!(
            "  {:<16} {:>3} txn(s) {:>16}",
            category.as_str(),
            matching.len(),
            format_inr(total)
        );
    }
}

fn print_summary(summary: &AtlSummary, account_type: AccountType) {
    let limits = FundingLimits::for_account(account_type);
    println!("ATL Grant Summary ({})", account_type.display_label());
    println!("{}", "─".repeat(48));
    println!("  Total Sanctioned:   {:>16}", format_inr(summary.total_sanctioned));
    println!("  Total Utilized:     {:>16}", format_inr(summary.total_utilized));
    println!("    Non-Recurring:    {:>16}", format_inr(summary.non_recurring_utilized));
    println!("    Recurring:        {:>16}", format_inr(summary.recurring_utilized));
    println!("  Interest Earned:    {:>16}", format_inr(summary.interest_earned));
    println!("  Current Balance:    {:>16}", format_inr(summary.balance));
    println!("  Utilization Rate:   {:>16}", format_percent(summary.utilization_percent()));
    println!("  Overall Risk:       {:>16}", summary.risk.as_str());
    if summary.non_recurring_utilized > limits.t1_non_recurring {
        println!(
            "  WARNING: non-recurring spend exceeds the {} cap of {}",
            limits.name,
            format_inr(limits.t1_non_recurring)
        );
    }
}

fn print_tranches(summary: &AtlSummary) {
    println!();
    println!("{:<10} {:>14} {:>14} {:>14}", "Tranche", "Received", "Spent", "Remaining");
    println!("{}", "─".repeat(55));
    for tranche in Tranche::all() {
        let usage = summary.tranche(*tranche);
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            tranche.as_str(),
            format_inr(usage.received),
            format_inr(usage.spent),
            format_inr(usage.received - usage.spent),
        );
    }
}

fn print_transactions(session: &SessionState) {
    println!(
        "{:<12} {:<36} {:>14} {:<15} {:<9} {:<6}",
        "Date", "Narration", "Amount", "Category", "Status", "Risk"
    );
    println!("{}", "─".repeat(98));
    for txn in session.transactions() {
        let narration = if txn.is_flagged {
            format!("! {}", txn.narration)
        } else {
            txn.narration.clone()
        };
        println!(
            "{:<12} {:<36} {:>14} {:<15} {:<9} {:<6}",
            truncate(&txn.date, 12),
            truncate(&narration, 36),
            format!("{}{}", txn.sign(), format_inr(txn.amount)),
            txn.category.as_str(),
            txn.verification.as_str(),
            txn.risk.as_str(),
        );
    }
}

fn print_limits() {
    println!(
        "{:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Limits", "Total", "Tranche 1", "Tranche 2", "Tranche 3", "T1 Rec", "T1 Non-Rec"
    );
    println!("{}", "─".repeat(92));
    for limits in [&GROSS, &NET_WITH_TDS] {
        println!(
            "{:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            limits.name,
            format_inr(limits.total),
            format_inr(limits.tranche_1),
            format_inr(limits.tranche_2),
            format_inr(limits.tranche_3),
            format_inr(limits.t1_recurring),
            format_inr(limits.t1_non_recurring),
        );
    }
    println!();
    println!("Savings accounts use the gross table; current accounts the net-of-TDS table.");
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
