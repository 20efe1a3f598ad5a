mod command;
mod plain;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

pub(crate) use command::CommandExtractor;
pub(crate) use plain::PlainTextExtractor;

/// Anything shorter than this after cleaning is treated as a failed read.
pub(crate) const MIN_USABLE_TEXT_LEN: usize = 50;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ExtractError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported document type: {0}")]
    Unsupported(String),
    #[error("{program} failed: {message}")]
    Program { program: String, message: String },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not extract readable text from the file ({len} characters). Please ensure the image/PDF is clear.")]
    TooShort { len: usize },
}

/// Turns a document on disk into plain text, reporting progress in 0..=100.
pub(crate) trait TextExtractor {
    fn extract(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentKind {
    PlainText,
    Table,
    Pdf,
    Image,
}

impl DocumentKind {
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" | "md" => Some(Self::PlainText),
            "csv" | "tsv" => Some(Self::Table),
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "gif" | "webp" => Some(Self::Image),
            _ => None,
        }
    }

    pub(crate) fn mime_type(&self, path: &Path) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Table => "text/csv",
            Self::Pdf => "application/pdf",
            Self::Image => match path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .as_deref()
            {
                Some("png") => "image/png",
                Some("tif") | Some("tiff") => "image/tiff",
                Some("bmp") => "image/bmp",
                Some("gif") => "image/gif",
                Some("webp") => "image/webp",
                _ => "image/jpeg",
            },
        }
    }
}

/// Routes each document to the plain reader or the external programs.
pub(crate) struct AutoExtractor {
    plain: PlainTextExtractor,
    command: CommandExtractor,
}

impl AutoExtractor {
    pub(crate) fn new(command: CommandExtractor) -> Self {
        Self {
            plain: PlainTextExtractor,
            command,
        }
    }
}

impl TextExtractor for AutoExtractor {
    fn extract(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        match DocumentKind::from_path(path) {
            Some(DocumentKind::PlainText | DocumentKind::Table) => {
                self.plain.extract(path, progress)
            }
            Some(DocumentKind::Pdf | DocumentKind::Image) => self.command.extract(path, progress),
            None => Err(ExtractError::Unsupported(path.display().to_string())),
        }
    }
}

/// Extract, clean and length-check a document in one go.
pub(crate) fn extract_usable_text(
    extractor: &dyn TextExtractor,
    path: &Path,
    progress: &mut dyn FnMut(u8),
) -> Result<String, ExtractError> {
    let raw = extractor.extract(path, progress)?;
    let text = clean_text(&raw);
    let len = text.chars().count();
    tracing::info!(path = %path.display(), len, "extracted document text");
    if len < MIN_USABLE_TEXT_LEN {
        return Err(ExtractError::TooShort { len });
    }
    Ok(text)
}

static SPACE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C]+").ok());

/// Normalise extracted text: unify line endings, collapse horizontal
/// whitespace, and drop blank lines.
pub(crate) fn clean_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace(['\r', '\u{a0}'], " ")
        .lines()
        .map(|line| match SPACE_RUN.as_ref() {
            Some(re) => re.replace_all(line.trim(), " ").into_owned(),
            None => line.split_whitespace().collect::<Vec<_>>().join(" "),
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests;
