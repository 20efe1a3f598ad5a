use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::extract::CommandExtractor;
use crate::models::{AccountType, Mode};

pub(crate) const DEFAULT_SCHOOL_NAME: &str = "Central Academy Senior Secondary School";

/// How a chosen document reaches the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub(crate) enum DocumentMode {
    /// Extract text on this machine, then send the text.
    #[default]
    Local,
    /// Upload the document and let the backend read it.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) api_base_url: String,
    pub(crate) request_timeout_secs: u64,
    pub(crate) default_mode: Mode,
    pub(crate) default_account_type: AccountType,
    pub(crate) school_name: String,
    pub(crate) document_mode: DocumentMode,
    pub(crate) tesseract_program: String,
    pub(crate) pdftotext_program: String,
    pub(crate) ocr_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".into(),
            request_timeout_secs: 120,
            default_mode: Mode::School,
            default_account_type: AccountType::Savings,
            school_name: DEFAULT_SCHOOL_NAME.into(),
            document_mode: DocumentMode::Local,
            tesseract_program: "tesseract".into(),
            pdftotext_program: "pdftotext".into(),
            ocr_language: "eng".into(),
        }
    }
}

impl Config {
    /// Load `config.json` from the platform config directory (if present)
    /// and apply `ATLAUDIT_*` environment overrides.
    pub(crate) fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ATLAUDIT_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(mode) = lookup("ATLAUDIT_MODE").and_then(|m| Mode::parse(&m)) {
            self.default_mode = mode;
        }
        if let Some(account) =
            lookup("ATLAUDIT_ACCOUNT_TYPE").and_then(|a| AccountType::parse(&a))
        {
            self.default_account_type = account;
        }
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub(crate) fn command_extractor(&self) -> CommandExtractor {
        CommandExtractor {
            tesseract_program: self.tesseract_program.clone(),
            pdftotext_program: self.pdftotext_program.clone(),
            ocr_language: self.ocr_language.clone(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "atlaudit", "ATLAudit")
}

pub(crate) fn config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.json"))
}

/// Directory for the log file, created on demand.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
