use std::path::Path;

use super::{DocumentKind, ExtractError, TextExtractor};

/// Reads text documents directly. CSV/TSV statements are flattened to one
/// line per row so the analysis service sees the same shape as pasted text.
pub(crate) struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        progress(0);
        let text = match DocumentKind::from_path(path) {
            Some(DocumentKind::Table) => flatten_table(path)?,
            _ => std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?,
        };
        progress(100);
        Ok(text)
    }
}

fn flatten_table(path: &Path) -> Result<String, ExtractError> {
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .delimiter(if is_tsv { b'\t' } else { b',' })
        .from_path(path)?;

    let mut lines = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[path = "plain_tests.rs"]
mod tests;
