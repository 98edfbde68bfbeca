//! Transport from the upload form to the relay.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use plancritic_core::{defaults, AnalysisResponse, Error, Orientation, Result};

use crate::config::ClientConfig;
use crate::controller::FileBlob;

/// Everything one submission sends.
#[derive(Debug, Clone)]
pub struct Submission {
    pub file: FileBlob,
    pub city: String,
    pub orientation: Orientation,
}

/// Sends a submission and returns the relay's answer.
///
/// Failures carry the message shown to the user in `Error::Request`.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResponse>;
}

/// Multipart POST to `{base_url}/api/analyze`.
pub struct HttpAnalysisTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpAnalysisTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_form(submission: &Submission) -> Result<Form> {
        let mut part = Part::bytes(submission.file.bytes.clone()).file_name(submission.file.name.clone());
        if let Some(mime) = submission.file.mime_type.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| Error::InvalidInput(format!("Invalid file type {}: {}", mime, e)))?;
        }

        Ok(Form::new()
            .part(defaults::FIELD_FILE, part)
            .text(defaults::FIELD_CITY, submission.city.clone())
            .text(defaults::FIELD_ORIENTATION, submission.orientation.as_str()))
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisTransport {
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResponse> {
        let url = self.config.analyze_url();
        debug!(
            url = %url,
            file = %submission.file.name,
            bytes = submission.file.bytes.len(),
            city = %submission.city,
            orientation = %submission.orientation,
            "Submitting plan"
        );

        let response = self
            .client
            .post(&url)
            .multipart(Self::build_form(submission)?)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "Relay rejected submission");
            return Err(Error::Request(rejection_message(status, response.text().await)));
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse relay response: {}", e)))
    }
}

/// Message for a non-OK relay answer: its body, else the status line.
fn rejection_message(
    status: reqwest::StatusCode,
    body: std::result::Result<String, reqwest::Error>,
) -> String {
    match body {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => status.to_string(),
        Err(e) => {
            debug!(error = %e, "Failed to read relay error body");
            status.to_string()
        }
    }
}
