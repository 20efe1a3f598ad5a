use std::path::{Path, PathBuf};

use crate::analysis::{AnalysisError, AnalysisRequest, Analyzer, DocumentUpload};
use crate::config::DocumentMode;
use crate::extract::{extract_usable_text, DocumentKind, ExtractError, TextExtractor};
use crate::models::{AccountType, Mode};
use crate::session::SessionState;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SubmitError {
    #[error("Please select a file or paste text.")]
    EmptyInput,
    #[error("An analysis is already in progress.")]
    Busy,
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// What the user handed over: pasted text, a chosen file, or both. A file
/// takes precedence over text.
#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub(crate) text: String,
    pub(crate) file: Option<PathBuf>,
    pub(crate) mode: Mode,
    pub(crate) account_type: AccountType,
}

impl Submission {
    pub(crate) fn text(text: impl Into<String>, mode: Mode, account_type: AccountType) -> Self {
        Self {
            text: text.into(),
            file: None,
            mode,
            account_type,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, mode: Mode, account_type: AccountType) -> Self {
        Self {
            text: String::new(),
            file: Some(path.into()),
            mode,
            account_type,
        }
    }

    fn validate(&self) -> Result<(), SubmitError> {
        if self.file.is_none() && self.text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        Ok(())
    }
}

/// Runs one submission end to end: extract, analyze, apply.
pub(crate) struct Pipeline {
    analyzer: Box<dyn Analyzer>,
    extractor: Box<dyn TextExtractor>,
    document_mode: DocumentMode,
    busy: bool,
}

impl Pipeline {
    pub(crate) fn new(
        analyzer: Box<dyn Analyzer>,
        extractor: Box<dyn TextExtractor>,
        document_mode: DocumentMode,
    ) -> Self {
        Self {
            analyzer,
            extractor,
            document_mode,
            busy: false,
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the pipeline ahead of a deferred `submit`, so the caller can
    /// show a busy indicator first. Fails if a submission is in flight.
    pub(crate) fn reserve(&mut self) -> Result<(), SubmitError> {
        if self.busy {
            return Err(SubmitError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Run a submission and apply the result to `session`. The session is
    /// only touched when the whole batch succeeds. Returns the number of
    /// transactions added.
    pub(crate) fn submit(
        &mut self,
        submission: &Submission,
        session: &mut SessionState,
        progress: &mut dyn FnMut(u8),
    ) -> Result<usize, SubmitError> {
        if let Err(e) = submission.validate() {
            self.busy = false;
            return Err(e);
        }
        self.busy = true;
        let outcome = self.run(submission, progress);
        self.busy = false;

        match outcome {
            Ok(result) => Ok(session.apply(result)),
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                Err(e)
            }
        }
    }

    fn run(
        &self,
        submission: &Submission,
        progress: &mut dyn FnMut(u8),
    ) -> Result<crate::analysis::AnalysisResult, SubmitError> {
        tracing::info!(
            mode = %submission.mode,
            account_type = %submission.account_type,
            file = ?submission.file,
            "submitting for analysis"
        );

        let text = match &submission.file {
            Some(path) if self.document_mode == DocumentMode::Remote => {
                let upload = read_upload(path)?;
                return Ok(self.analyzer.analyze_document(
                    &upload,
                    submission.mode,
                    submission.account_type,
                )?);
            }
            Some(path) => extract_usable_text(self.extractor.as_ref(), path, progress)?,
            None => submission.text.trim().to_string(),
        };

        let request = AnalysisRequest {
            text_data: text,
            mode: submission.mode,
            account_type: submission.account_type,
        };
        Ok(self.analyzer.analyze(&request)?)
    }
}

fn read_upload(path: &Path) -> Result<DocumentUpload, ExtractError> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| ExtractError::Unsupported(path.display().to_string()))?;
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(DocumentUpload {
        file_name,
        mime_type: kind.mime_type(path),
        bytes,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
