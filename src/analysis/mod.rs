mod http;

use serde::{Deserialize, Serialize};

use crate::models::{AccountType, AuditObservation, ComplianceCheck, Mode, Transaction};

pub(crate) use http::HttpAnalyzer;

pub(crate) const GENERIC_FAILURE: &str = "Analysis failed. Please try again.";

/// JSON body of a text analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisRequest {
    pub(crate) text_data: String,
    pub(crate) mode: Mode,
    pub(crate) account_type: AccountType,
}

/// A document sent as-is for server-side extraction.
#[derive(Debug, Clone)]
pub(crate) struct DocumentUpload {
    pub(crate) file_name: String,
    pub(crate) mime_type: &'static str,
    pub(crate) bytes: Vec<u8>,
}

/// One complete batch from the analysis service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisResult {
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
    #[serde(default)]
    pub(crate) observations: Vec<AuditObservation>,
    #[serde(default)]
    pub(crate) compliance_checklist: Vec<ComplianceCheck>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum AnalysisError {
    #[error("Could not reach analysis service: {0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from analysis service: {0}")]
    MalformedResponse(String),
}

/// Classifies statement text into transactions, observations and a checklist.
pub(crate) trait Analyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;

    fn analyze_document(
        &self,
        document: &DocumentUpload,
        mode: Mode,
        account_type: AccountType,
    ) -> Result<AnalysisResult, AnalysisError>;
}

/// Deployed backends wrap the batch as `{ success, data: {...} }`; older
/// ones return it bare.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<AnalysisResult>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a status code and body from the analysis endpoint.
pub(crate) fn parse_response(status: u16, body: &str) -> Result<AnalysisResult, AnalysisError> {
    if !(200..300).contains(&status) {
        let text = body.trim();
        let message = if text.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            format!("Backend error: {text}")
        };
        return Err(AnalysisError::Server { status, message });
    }

    let malformed = |e: serde_json::Error| AnalysisError::MalformedResponse(e.to_string());
    let value: serde_json::Value = serde_json::from_str(body).map_err(malformed)?;

    if value.get("data").is_none() && value.get("success").is_none() {
        return serde_json::from_value(value).map_err(malformed);
    }

    let envelope: Envelope = serde_json::from_value(value).map_err(malformed)?;
    if envelope.success == Some(false) {
        return Err(AnalysisError::Server {
            status,
            message: envelope
                .error
                .or(envelope.message)
                .map(|m| format!("Backend error: {m}"))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        });
    }
    envelope
        .data
        .ok_or_else(|| AnalysisError::MalformedResponse("response has no data".into()))
}
