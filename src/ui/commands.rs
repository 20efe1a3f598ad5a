use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::export::{expand_home, export_csv};
use crate::models::{AccountType, Mode};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("an", "Go to Analyze", cmd_analyze_screen, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "account",
        "Set account type (e.g. :account current)",
        cmd_account,
        r
    );
    register_command!("mode", "Set mode (e.g. :mode auditor)", cmd_mode, r);
    register_command!(
        "school",
        "Set school name for the UC (e.g. :school Govt. Model School)",
        cmd_school,
        r
    );
    register_command!("fy", "Set UC financial year (e.g. :fy FY 2023-24)", cmd_fy, r);
    register_command!("paste", "Edit the pasted statement text", cmd_paste, r);
    register_command!("submit", "Analyze the pasted text", cmd_submit, r);
    register_command!(
        "analyze",
        "Analyze a document (e.g. :analyze ~/statement.pdf)",
        cmd_analyze,
        r
    );
    register_command!(
        "search",
        "Filter transactions (e.g. :search vendor)",
        cmd_search,
        r
    );
    register_command!("purge", "Clear all analyzed data", cmd_purge, r);
    register_command!(
        "export",
        "Export registry to CSV (e.g. :export ~/atl.csv)",
        cmd_export,
        r
    );
    register_command!(
        "report",
        "Save UC and audit report as text (e.g. :report ~/uc.txt)",
        cmd_report,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

pub(crate) fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.search_input.clear();
    if screen == Screen::Analyze {
        app.refresh_file_browser();
    }
}

fn default_output(file_name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    Path::new(&home).join(file_name)
}

fn output_path(args: &str, default_name: &str) -> PathBuf {
    if args.is_empty() {
        default_output(default_name)
    } else {
        PathBuf::from(expand_home(args))
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    switch_screen(app, Screen::Dashboard);
    Ok(())
}

fn cmd_analyze_screen(_args: &str, app: &mut App) -> anyhow::Result<()> {
    switch_screen(app, Screen::Analyze);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App) -> anyhow::Result<()> {
    switch_screen(app, Screen::Transactions);
    Ok(())
}

fn cmd_reports(_args: &str, app: &mut App) -> anyhow::Result<()> {
    switch_screen(app, Screen::Reports);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_account(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.toggle_account_type();
        return Ok(());
    }
    match AccountType::parse(args) {
        Some(account_type) => app.set_account_type(account_type),
        None => {
            let names: Vec<&str> = AccountType::all().iter().map(|a| a.as_str()).collect();
            app.set_status(format!(
                "Unknown account type '{args}'. Use one of: {}",
                names.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_mode(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.toggle_mode();
        return Ok(());
    }
    match Mode::parse(args) {
        Some(mode) => app.set_mode(mode),
        None => {
            let names: Vec<&str> = Mode::all().iter().map(|m| m.as_str()).collect();
            app.set_status(format!(
                "Unknown mode '{args}'. Use one of: {}",
                names.join(", ")
            ));
        }
    }
    Ok(())
}

fn cmd_school(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("School: {}", app.school_name));
        return Ok(());
    }
    app.school_name = args.to_string();
    app.set_status(format!("School set to: {args}"));
    Ok(())
}

fn cmd_fy(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.financial_year = crate::report::current_financial_year();
    } else {
        app.financial_year = args.to_string();
    }
    app.set_status(format!("Financial year: {}", app.financial_year));
    Ok(())
}

fn cmd_paste(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Analyze;
    app.input_mode = InputMode::Paste;
    app.set_status("Paste or type statement text. Esc to finish, :submit to analyze");
    Ok(())
}

fn cmd_submit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.submit_pasted_text();
    Ok(())
}

fn cmd_analyze(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        switch_screen(app, Screen::Analyze);
        return Ok(());
    }
    let path = PathBuf::from(expand_home(args));
    if !path.exists() {
        app.set_status(format!("File not found: {}", path.display()));
        return Ok(());
    }
    app.submit_file(path);
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.search_input = args.to_string();
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        let n = app.filtered_transactions().len();
        app.set_status(format!("Searching: {args} ({n} matches)"));
    }
    Ok(())
}

fn cmd_purge(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let count = app.session.transactions().len();
    if app.session.is_empty() && app.session.observations().is_empty() {
        app.set_status("Nothing to purge");
        return Ok(());
    }
    app.confirm_message = format!("Purge {count} transaction(s) and all audit findings?");
    app.pending_action = Some(PendingAction::Purge { count });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.session.is_empty() {
        app.set_status("No transactions to export");
        return Ok(());
    }
    let path = output_path(args, "atlaudit-registry.csv");
    let count = export_csv(&path, app.session.transactions())?;
    app.set_status(format!("Exported {count} transactions to {}", path.display()));
    Ok(())
}

fn cmd_report(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = output_path(args, "atlaudit-report.txt");
    let text = crate::report::full_report(
        &app.summary(),
        &app.school_name,
        &app.financial_year,
        app.session.transactions(),
        app.session.observations(),
        app.session.checklist(),
    );
    std::fs::write(&path, text)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved reports");
    app.set_status(format!("Reports saved to {}", path.display()));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
