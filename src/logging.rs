use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub(crate) const LOG_ENV: &str = "ATLAUDIT_LOG";
pub(crate) const LOG_FILE: &str = "atlaudit.log";
const DEFAULT_FILTER: &str = "atlaudit=info";

static TRACING_INIT: Once = Once::new();

/// Build the filter from `ATLAUDIT_LOG`, falling back to `atlaudit=info`.
pub(crate) fn env_filter(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Route tracing output to `atlaudit.log` in `log_dir`. The terminal belongs
/// to the TUI, so nothing is written to stdout/stderr.
pub(crate) fn init(log_dir: &Path) -> Result<PathBuf> {
    let path = log_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    TRACING_INIT.call_once(|| {
        let filter = env_filter(std::env::var(LOG_ENV).ok().as_deref());
        let installed = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .try_init();
        if installed.is_err() {
            eprintln!("Warning: tracing subscriber already installed");
        }
    });
    Ok(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            env_filter(None).to_string(),
            EnvFilter::new(DEFAULT_FILTER).to_string()
        );
    }

    #[test]
    fn test_filter_from_env_value() {
        assert_eq!(
            env_filter(Some("atlaudit=debug")).to_string(),
            EnvFilter::new("atlaudit=debug").to_string()
        );
    }

    #[test]
    fn test_invalid_filter_falls_back() {
        assert_eq!(
            env_filter(Some("atlaudit=notalevel")).to_string(),
            EnvFilter::new(DEFAULT_FILTER).to_string()
        );
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = init(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(LOG_FILE));
        assert!(path.exists());
    }

    #[test]
    fn test_init_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("deeper");
        assert!(init(&missing).is_err());
    }
}
