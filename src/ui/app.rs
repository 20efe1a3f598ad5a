use std::path::PathBuf;

use crate::config::Config;
use crate::extract::DocumentKind;
use crate::models::{AccountType, Mode, Transaction};
use crate::pipeline::{Pipeline, Submission};
use crate::session::SessionState;
use crate::summary::AtlSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Analyze,
    Transactions,
    Reports,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Analyze,
            Self::Transactions,
            Self::Reports,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Analyze => write!(f, "Analyze"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Reports => write!(f, "Reports"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Paste,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Paste => write!(f, "PASTE"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    Purge { count: usize },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Session
    pub(crate) session: SessionState,
    pub(crate) pipeline: Pipeline,
    pub(crate) account_type: AccountType,
    pub(crate) mode: Mode,
    pub(crate) school_name: String,
    pub(crate) financial_year: String,

    // Analyze
    pub(crate) paste_buffer: String,
    pub(crate) pending_submission: Option<Submission>,
    pub(crate) last_submission: Option<String>,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Reports
    pub(crate) report_scroll: usize,

    // File browser
    pub(crate) file_browser_path: PathBuf,
    pub(crate) file_browser_entries: Vec<PathBuf>,
    pub(crate) file_browser_index: usize,
    pub(crate) file_browser_scroll: usize,
    pub(crate) file_browser_show_hidden: bool,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config, pipeline: Pipeline) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            session: SessionState::new(),
            pipeline,
            account_type: config.default_account_type,
            mode: config.default_mode,
            school_name: config.school_name.clone(),
            financial_year: crate::report::current_financial_year(),

            paste_buffer: String::new(),
            pending_submission: None,
            last_submission: None,

            transaction_index: 0,
            transaction_scroll: 0,

            report_scroll: 0,

            file_browser_path: std::env::current_dir().unwrap_or_else(|_| {
                directories::UserDirs::new()
                    .map(|d| d.home_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("/"))
            }),
            file_browser_entries: Vec::new(),
            file_browser_index: 0,
            file_browser_scroll: 0,
            file_browser_show_hidden: false,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn summary(&self) -> AtlSummary {
        self.session.summary(self.account_type)
    }

    pub(crate) fn toggle_account_type(&mut self) {
        self.set_account_type(self.account_type.toggled());
    }

    pub(crate) fn set_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
        tracing::info!(%account_type, "account type changed");
        self.set_status(format!("Account type: {}", account_type.display_label()));
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        tracing::info!(%mode, "mode changed");
        self.set_status(format!("Mode: {mode}"));
    }

    /// Indices into the session transactions that match the live search.
    pub(crate) fn filtered_transactions(&self) -> Vec<usize> {
        let txns = self.session.transactions();
        if self.search_input.is_empty() {
            return (0..txns.len()).collect();
        }
        let needle = self.search_input.to_lowercase();
        txns.iter()
            .enumerate()
            .filter(|(_, t)| matches_search(t, &needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Claim the pipeline and stage a submission for the event loop to run
    /// after the next redraw.
    pub(crate) fn queue_submission(&mut self, submission: Submission) {
        if let Err(e) = self.pipeline.reserve() {
            self.set_status(e.to_string());
            return;
        }
        self.last_submission = Some(match &submission.file {
            Some(path) => path.display().to_string(),
            None => "pasted text".to_string(),
        });
        self.pending_submission = Some(submission);
        self.set_status("Analyzing… (this can take a while)");
    }

    pub(crate) fn submit_pasted_text(&mut self) {
        let submission = Submission::text(self.paste_buffer.clone(), self.mode, self.account_type);
        self.queue_submission(submission);
    }

    pub(crate) fn submit_file(&mut self, path: PathBuf) {
        let submission = Submission::file(path, self.mode, self.account_type);
        self.queue_submission(submission);
    }

    /// Run the staged submission, if any, and report the outcome.
    pub(crate) fn run_pending_submission(&mut self) -> bool {
        let Some(submission) = self.pending_submission.take() else {
            return false;
        };
        let result = self.pipeline.submit(&submission, &mut self.session, &mut |pct| {
            tracing::debug!(progress = pct, "extraction progress");
        });
        match result {
            Ok(added) => {
                if submission.file.is_none() {
                    self.paste_buffer.clear();
                }
                self.screen = Screen::Dashboard;
                self.set_status(format!(
                    "Analysis complete: {added} transaction(s) added, {} in registry",
                    self.session.transactions().len()
                ));
            }
            Err(e) => self.set_status(format!("Error: {e}")),
        }
        true
    }

    pub(crate) fn purge(&mut self) -> usize {
        let removed = self.session.purge();
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.report_scroll = 0;
        removed
    }

    pub(crate) fn refresh_file_browser(&mut self) {
        let mut entries: Vec<PathBuf> = Vec::new();

        if let Some(parent) = self.file_browser_path.parent() {
            entries.push(parent.to_path_buf());
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.file_browser_path) {
            let is_hidden = |p: &PathBuf| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
            };

            let all: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    (self.file_browser_show_hidden || !is_hidden(p))
                        && (p.is_dir() || DocumentKind::from_path(p).is_some())
                })
                .collect();

            let (mut dirs, mut files): (Vec<PathBuf>, Vec<PathBuf>) =
                all.into_iter().partition(|p| p.is_dir());
            dirs.sort();
            files.sort();
            entries.extend(dirs);
            entries.extend(files);
        }

        self.file_browser_entries = entries;
        self.file_browser_index = 0;
        self.file_browser_scroll = 0;
        self.search_input.clear();
    }

    /// Returns filtered file browser entries (indices into `file_browser_entries`).
    /// When the search is empty, returns all. The `..` entry always passes.
    pub(crate) fn file_browser_filtered(&self) -> Vec<usize> {
        if self.search_input.is_empty() {
            return (0..self.file_browser_entries.len()).collect();
        }
        let filter = self.search_input.to_ascii_lowercase();
        self.file_browser_entries
            .iter()
            .enumerate()
            .filter(|(_, path)| {
                if Some(path.as_path()) == self.file_browser_path.parent() {
                    return true;
                }
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| name.to_ascii_lowercase().contains(&filter))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Enter the selected directory, or submit the selected document.
    pub(crate) fn open_selected_entry(&mut self) {
        let filtered = self.file_browser_filtered();
        let Some(&real_idx) = filtered.get(self.file_browser_index) else {
            return;
        };
        let path = self.file_browser_entries[real_idx].clone();
        if path.is_dir() {
            self.file_browser_path = path;
            self.refresh_file_browser();
        } else {
            self.submit_file(path);
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn matches_search(txn: &Transaction, needle: &str) -> bool {
    txn.narration.to_lowercase().contains(needle)
        || txn.date.contains(needle)
        || txn.category.as_str().to_lowercase().contains(needle)
        || txn
            .flag_reason
            .as_deref()
            .is_some_and(|r| r.to_lowercase().contains(needle))
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
