use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};

use super::{parse_response, AnalysisError, AnalysisRequest, AnalysisResult, Analyzer, DocumentUpload};
use crate::models::{AccountType, Mode};

/// Talks to the report backend over HTTP/JSON.
pub(crate) struct HttpAnalyzer {
    client: Client,
    base_url: String,
}

impl HttpAnalyzer {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/generate-report", self.base_url)
    }

    fn finish(response: reqwest::Result<Response>) -> Result<AnalysisResult, AnalysisError> {
        let response = response.map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "analysis response received");
        parse_response(status, &body)
    }
}

impl Analyzer for HttpAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!(
            url = %self.endpoint(),
            mode = %request.mode,
            account_type = %request.account_type,
            chars = request.text_data.chars().count(),
            "requesting analysis"
        );
        Self::finish(self.client.post(self.endpoint()).json(request).send())
    }

    fn analyze_document(
        &self,
        document: &DocumentUpload,
        mode: Mode,
        account_type: AccountType,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!(
            url = %self.endpoint(),
            file = %document.file_name,
            bytes = document.bytes.len(),
            %mode,
            %account_type,
            "uploading document for analysis"
        );
        let part = multipart::Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(document.mime_type)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let form = multipart::Form::new()
            .text("mode", mode.as_str())
            .text("accountType", account_type.as_str())
            .part("file", part);
        Self::finish(self.client.post(self.endpoint()).multipart(form).send())
    }
}
