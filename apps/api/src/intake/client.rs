//! HTTP client for the Extraction and Summarization gateways.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use thiserror::Error;
use tracing::{debug, info};

use crate::intake::session::UploadedFile;
use crate::models::document::{ErrorBody, ExtractResponse, ExtractedDocument};
use crate::models::summary::{ProcessRequest, ProcessResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status; `message` is its `error` field.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Sends one file to the Extraction Gateway.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedDocument, ClientError>;
}

#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        // Parsing and generation can both take minutes on large notes.
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST /api/process; returns the generated resume.
    pub async fn summarize(&self, request: &ProcessRequest) -> Result<String, ClientError> {
        info!(texts = request.texts.len(), "Requesting resume");
        let response = self
            .client
            .post(self.url("/api/process"))
            .json(request)
            .send()
            .await?;
        let body: ProcessResponse = check(response).await?.json().await?;
        Ok(body.resume)
    }
}

#[async_trait]
impl ExtractionApi for GatewayClient {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedDocument, ClientError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/extract"))
            .multipart(form)
            .send()
            .await?;
        let body: ExtractResponse = check(response).await?.json().await?;
        debug!(filename = %body.filename, chars = body.text.len(), "Text extracted");
        Ok(body.into())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message: server_message(status.as_u16(), &body),
    })
}

fn server_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_uses_error_field() {
        assert_eq!(
            server_message(400, r#"{"error":"No file provided"}"#),
            "No file provided"
        );
    }

    #[test]
    fn test_server_message_without_json() {
        assert_eq!(
            server_message(502, "<html>Bad Gateway</html>"),
            "request failed with status 502"
        );
    }

    #[test]
    fn test_url_join() {
        let client = GatewayClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/api/extract"), "http://localhost:3000/api/extract");
    }
}
