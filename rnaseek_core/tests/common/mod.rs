#![allow(dead_code)]

use async_trait::async_trait;
use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
use flate2::{write::GzEncoder, Compression};
use parking_lot::Mutex;
use rnaseek_core::{
    auth::LocalIdentityProvider,
    config::{AppConfig, IdentityConfig},
    upload::{MultipartPayload, SubmissionReceipt, Submitter},
    AppError, IdentityClient, Result,
};
use serde_json::json;
use std::{io::Write, net::SocketAddr, sync::Arc};

pub const FASTQ_RECORD: &str = "@read1\nACGT\n+\n!!!!\n";
pub const BOUNDARY: &str = "rnaseek-test-boundary";

pub fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[derive(Default)]
pub struct RecordingSubmitter {
    pub payloads: Mutex<Vec<MultipartPayload>>,
    pub fail_with: Option<String>,
}

impl RecordingSubmitter {
    pub fn failing(message: &str) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().len()
    }
}

#[async_trait]
impl Submitter for RecordingSubmitter {
    async fn submit(&self, payload: MultipartPayload) -> Result<SubmissionReceipt> {
        self.payloads.lock().push(payload);
        match &self.fail_with {
            Some(message) => Err(AppError::Submission(message.clone())),
            None => Ok(SubmissionReceipt::accepted()),
        }
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.identity = IdentityConfig {
        session_restore_delay_ms: 0,
        ..IdentityConfig::default()
    };
    config
}

pub fn local_identity(config: &AppConfig) -> IdentityClient {
    IdentityClient::new(Arc::new(LocalIdentityProvider::new(config.identity.clone())))
}

/// Multipart body carrying one file under the `file` field.
pub fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub field_name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// A stand-in processing backend on an ephemeral port.
///
/// `POST /process-fastq` records every part and answers with a small JSON report;
/// `POST /broken` always answers 500; `POST /plain` accepts with a text body.
pub async fn spawn_backend() -> (SocketAddr, Arc<Mutex<Vec<ReceivedUpload>>>) {
    let received: Arc<Mutex<Vec<ReceivedUpload>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    let app = Router::new()
        .route(
            "/process-fastq",
            post(move |mut multipart: Multipart| {
                let sink = sink.clone();
                async move {
                    let mut reads = 0;
                    while let Ok(Some(field)) = multipart.next_field().await {
                        let field_name = field.name().unwrap_or_default().to_string();
                        let filename = field.file_name().map(str::to_string);
                        let content_type = field.content_type().map(str::to_string);
                        let data = field.bytes().await.unwrap_or_default().to_vec();
                        reads += data.iter().filter(|b| **b == b'@').count();
                        sink.lock().push(ReceivedUpload {
                            field_name,
                            filename,
                            content_type,
                            data,
                        });
                    }
                    Json(json!({ "reads": reads }))
                }
            }),
        )
        .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/plain", post(|| async { "queued" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, received)
}
