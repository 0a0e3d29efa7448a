use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::files::ProcessedFile;

/// One file under one multipart field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    pub field_name: String,
    pub file: ProcessedFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl SubmissionReceipt {
    pub fn accepted() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }
}

/// Delivers a prepared upload to the processing backend.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: MultipartPayload) -> Result<SubmissionReceipt>;
}

#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &UploadConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: MultipartPayload) -> Result<SubmissionReceipt> {
        let MultipartPayload { field_name, file } = payload;
        let size = file.bytes.len();

        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part(field_name, part);

        info!(endpoint = %self.endpoint, filename = %file.name, size, "submitting file");

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "backend rejected submission");
            return Err(AppError::Submission(format!(
                "Processing failed: HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await?;
        let body = if body.is_empty() {
            None
        } else {
            match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!(endpoint = %self.endpoint, size = body.len(), error = %e, "backend reply is not JSON");
                    None
                }
            }
        };

        if let Some(result) = &body {
            info!(analysis = %result, "analysis results received");
        }

        Ok(SubmissionReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
