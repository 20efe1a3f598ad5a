#![allow(clippy::unwrap_used)]

use super::*;
use crate::ui::test_support::{loaded_app, test_app};

#[test]
fn test_screen_commands() {
    let mut app = test_app();
    for (cmd, screen) in [
        ("t", Screen::Transactions),
        ("r", Screen::Reports),
        ("an", Screen::Analyze),
        ("d", Screen::Dashboard),
        ("transactions", Screen::Transactions),
        ("reports", Screen::Reports),
        ("dashboard", Screen::Dashboard),
    ] {
        handle_command(cmd, &mut app).unwrap();
        assert_eq!(app.screen, screen, ":{cmd}");
    }
}

#[test]
fn test_quit() {
    let mut app = test_app();
    handle_command("q", &mut app).unwrap();
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = test_app();
    handle_command("purg", &mut app).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :purg. Did you mean :purge?"
    );
    handle_command("exprt /tmp/x.csv", &mut app).unwrap();
    assert!(app.status_message.ends_with("Did you mean :export?"));
}

#[test]
fn test_account_command() {
    let mut app = test_app();
    handle_command("account current", &mut app).unwrap();
    assert_eq!(app.account_type, AccountType::Current);
    handle_command("account", &mut app).unwrap();
    assert_eq!(app.account_type, AccountType::Savings);

    handle_command("account fixed", &mut app).unwrap();
    assert_eq!(app.account_type, AccountType::Savings);
    assert!(app.status_message.starts_with("Unknown account type 'fixed'"));
}

#[test]
fn test_mode_command() {
    let mut app = test_app();
    handle_command("mode auditor", &mut app).unwrap();
    assert_eq!(app.mode, Mode::Auditor);
    handle_command("mode principal", &mut app).unwrap();
    assert_eq!(app.mode, Mode::Auditor);
    assert!(app.status_message.starts_with("Unknown mode"));
}

#[test]
fn test_school_and_fy_commands() {
    let mut app = test_app();
    handle_command("school Govt. Model School, Sector 10", &mut app).unwrap();
    assert_eq!(app.school_name, "Govt. Model School, Sector 10");

    handle_command("fy FY 2022-23", &mut app).unwrap();
    assert_eq!(app.financial_year, "FY 2022-23");
    handle_command("fy", &mut app).unwrap();
    assert_eq!(app.financial_year, crate::report::current_financial_year());
}

#[test]
fn test_paste_enters_paste_mode() {
    let mut app = test_app();
    handle_command("paste", &mut app).unwrap();
    assert_eq!(app.screen, Screen::Analyze);
    assert_eq!(app.input_mode, InputMode::Paste);
}

#[test]
fn test_submit_queues_pasted_text() {
    let mut app = test_app();
    app.paste_buffer = "statement".into();
    handle_command("submit", &mut app).unwrap();
    assert!(app.pending_submission.is_some());
    assert!(app.run_pending_submission());
    assert_eq!(app.session.transactions().len(), 3);
}

#[test]
fn test_analyze_missing_file() {
    let mut app = test_app();
    handle_command("analyze /definitely/not/here.pdf", &mut app).unwrap();
    assert_eq!(app.status_message, "File not found: /definitely/not/here.pdf");
    assert!(app.pending_submission.is_none());
}

#[test]
fn test_search_command() {
    let mut app = loaded_app();
    handle_command("search interest", &mut app).unwrap();
    assert_eq!(app.screen, Screen::Transactions);
    assert_eq!(app.status_message, "Searching: interest (1 matches)");
    handle_command("search", &mut app).unwrap();
    assert!(app.search_input.is_empty());
}

#[test]
fn test_purge_requires_confirmation() {
    let mut app = loaded_app();
    handle_command("purge", &mut app).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::Purge { count: 3 })
    ));
    assert_eq!(app.session.transactions().len(), 3);
}

#[test]
fn test_purge_empty_session() {
    let mut app = test_app();
    handle_command("purge", &mut app).unwrap();
    assert_eq!(app.status_message, "Nothing to purge");
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_export_command_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atl.csv");
    let mut app = loaded_app();
    handle_command(&format!("export {}", path.display()), &mut app).unwrap();
    assert!(app.status_message.starts_with("Exported 3 transactions"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_empty_session() {
    let mut app = test_app();
    handle_command("export /tmp/never-written.csv", &mut app).unwrap();
    assert_eq!(app.status_message, "No transactions to export");
}

#[test]
fn test_report_command_writes_both_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uc.txt");
    let mut app = loaded_app();
    handle_command(&format!("report {}", path.display()), &mut app).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("FORM GFR 12-A"));
    assert!(text.contains(crate::config::DEFAULT_SCHOOL_NAME));
    assert!(text.contains("AUDIT INTELLIGENCE SUMMARY"));
    assert!(text.contains("Refreshments charged"));
}

#[test]
fn test_report_to_missing_dir_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("uc.txt");
    let mut app = loaded_app();
    assert!(handle_command(&format!("report {}", path.display()), &mut app).is_err());
}

#[test]
fn test_help_lists_commands() {
    let mut app = test_app();
    handle_command("help", &mut app).unwrap();
    assert!(app.show_help);
    for name in ["account", "mode", "school", "paste", "submit", "analyze", "purge", "export", "report"] {
        assert!(COMMANDS.contains_key(name), "missing :{name}");
    }
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("purge", "purge"), 0);
    assert_eq!(levenshtein("mdoe", "mode"), 2);
}
