use std::path::Path;
use std::process::Command;

use super::{DocumentKind, ExtractError, TextExtractor};

/// Shells out to `pdftotext` for PDFs and `tesseract` for scanned images.
#[derive(Debug, Clone)]
pub(crate) struct CommandExtractor {
    pub(crate) tesseract_program: String,
    pub(crate) pdftotext_program: String,
    pub(crate) ocr_language: String,
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self {
            tesseract_program: "tesseract".into(),
            pdftotext_program: "pdftotext".into(),
            ocr_language: "eng".into(),
        }
    }
}

impl CommandExtractor {
    fn invocation(&self, path: &Path) -> Result<(String, Vec<String>), ExtractError> {
        let file = path.display().to_string();
        match DocumentKind::from_path(path) {
            Some(DocumentKind::Pdf) => Ok((
                self.pdftotext_program.clone(),
                vec!["-layout".into(), file, "-".into()],
            )),
            Some(DocumentKind::Image) => Ok((
                self.tesseract_program.clone(),
                vec![file, "stdout".into(), "-l".into(), self.ocr_language.clone()],
            )),
            _ => Err(ExtractError::Unsupported(file)),
        }
    }
}

impl TextExtractor for CommandExtractor {
    fn extract(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        let (program, args) = self.invocation(path)?;
        progress(0);
        tracing::debug!(%program, ?args, "running text extraction program");

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|e| ExtractError::Program {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.lines().last().unwrap_or("").trim();
            return Err(ExtractError::Program {
                program,
                message: if message.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    message.to_string()
                },
            });
        }

        progress(100);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
