#![allow(clippy::unwrap_used)]

use std::path::Path;

use crate::analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, Analyzer, DocumentUpload,
};
use crate::config::{Config, DocumentMode};
use crate::extract::{ExtractError, TextExtractor};
use crate::models::{AccountType, Mode};
use crate::pipeline::Pipeline;

use super::app::App;

pub(crate) const BATCH: &str = r#"{
    "transactions": [
        {"date": "05-05-2023", "narration": "Arduino kits", "amount": 62000,
         "type": "Debit", "category": "Non-Recurring", "tranche": "Tranche 1",
         "financialYear": "2023-24", "riskScore": "LOW", "verificationStatus": "Verified"},
        {"date": "12-08-2023", "narration": "Workshop refreshments", "amount": 4500,
         "type": "Debit", "category": "Recurring", "tranche": "Tranche 1",
         "financialYear": "2023-24", "isFlagged": true, "flagReason": "Not an ATL expense",
         "riskScore": "HIGH", "verificationStatus": "Missing"},
        {"date": "30-09-2023", "narration": "SB interest", "amount": 1210,
         "type": "Credit", "category": "Interest/Refund", "tranche": "None",
         "financialYear": "2023-24", "riskScore": "LOW", "verificationStatus": "Verified"}
    ],
    "observations": [
        {"type": "Financial", "severity": "HIGH", "observation": "Refreshments charged",
         "recommendation": "Reverse the entry"}
    ],
    "complianceChecklist": [
        {"label": "Separate bank account", "status": "Compliant"}
    ]
}"#;

struct StubAnalyzer;

impl Analyzer for StubAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        if request.text_data.contains("FAIL") {
            return Err(AnalysisError::Server {
                status: 500,
                message: "Backend error: stub failure".into(),
            });
        }
        Ok(serde_json::from_str(BATCH).unwrap())
    }

    fn analyze_document(
        &self,
        _document: &DocumentUpload,
        _mode: Mode,
        _account_type: AccountType,
    ) -> Result<AnalysisResult, AnalysisError> {
        Ok(serde_json::from_str(BATCH).unwrap())
    }
}

struct StubExtractor;

impl TextExtractor for StubExtractor {
    fn extract(&self, path: &Path, _progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub(crate) fn test_app() -> App {
    let pipeline = Pipeline::new(
        Box::new(StubAnalyzer),
        Box::new(StubExtractor),
        DocumentMode::Local,
    );
    App::new(&Config::default(), pipeline)
}

/// An app whose registry already holds one analyzed batch.
pub(crate) fn loaded_app() -> App {
    let mut app = test_app();
    app.paste_buffer = "statement text".into();
    app.submit_pasted_text();
    assert!(app.run_pending_submission());
    app
}
