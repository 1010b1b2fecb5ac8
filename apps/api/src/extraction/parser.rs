//! Document parser seam and the LlamaParse cloud client behind it.
//!
//! The gateway only needs "path in, ordered page texts out"; layout
//! recognition happens entirely in the remote service.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read staged file: {0}")]
    Read(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse job {job_id} ended with status {status}")]
    JobFailed { job_id: String, status: String },

    #[error("parse job {job_id} did not finish after {polls} polls")]
    Timeout { job_id: String, polls: u32 },
}

/// Turns a staged document into its page texts, in page order.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, path: &Path) -> Result<Vec<String>, ParseError>;
}

/// Which rendition of each page the parser returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Markdown,
    Text,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Markdown => f.write_str("markdown"),
            ResultType::Text => f.write_str("text"),
        }
    }
}

impl FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ResultType::Markdown),
            "text" | "txt" => Ok(ResultType::Text),
            other => Err(format!("expected 'markdown' or 'text', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlamaParseSettings {
    pub api_key: String,
    pub base_url: String,
    pub result_type: ResultType,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

#[derive(Debug, Deserialize)]
struct JobResponse {
    id: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct JsonResult {
    #[serde(default)]
    pages: Vec<PageResult>,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    md: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum JobState {
    Pending,
    Done,
    Failed,
}

fn classify(status: &str) -> JobState {
    match status.to_ascii_uppercase().as_str() {
        "SUCCESS" | "PARTIAL_SUCCESS" => JobState::Done,
        "ERROR" | "CANCELED" | "CANCELLED" => JobState::Failed,
        _ => JobState::Pending,
    }
}

/// Client for the LlamaParse job API: upload, poll, fetch per-page results.
#[derive(Clone)]
pub struct LlamaParseClient {
    client: Client,
    settings: LlamaParseSettings,
}

impl LlamaParseClient {
    pub fn new(settings: LlamaParseSettings) -> Result<Self, ParseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn upload(&self, path: &Path) -> Result<String, ParseError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/parsing/upload"))
            .bearer_auth(&self.settings.api_key)
            .multipart(form)
            .send()
            .await?;
        let job: JobResponse = check(response).await?.json().await?;
        Ok(job.id)
    }

    async fn wait_for(&self, job_id: &str) -> Result<(), ParseError> {
        for poll in 0..self.settings.max_polls {
            let response = self
                .client
                .get(self.url(&format!("/api/parsing/job/{job_id}")))
                .bearer_auth(&self.settings.api_key)
                .send()
                .await?;
            let job: JobResponse = check(response).await?.json().await?;

            match classify(&job.status) {
                JobState::Done => {
                    debug!(job_id = %job_id, polls = poll + 1, "Parse job finished");
                    return Ok(());
                }
                JobState::Failed => {
                    return Err(ParseError::JobFailed {
                        job_id: job.id,
                        status: job.status,
                    })
                }
                JobState::Pending => tokio::time::sleep(self.settings.poll_interval).await,
            }
        }

        Err(ParseError::Timeout {
            job_id: job_id.to_string(),
            polls: self.settings.max_polls,
        })
    }

    async fn fetch_pages(&self, job_id: &str) -> Result<Vec<String>, ParseError> {
        let response = self
            .client
            .get(self.url(&format!("/api/parsing/job/{job_id}/result/json")))
            .bearer_auth(&self.settings.api_key)
            .send()
            .await?;
        let result: JsonResult = check(response).await?.json().await?;
        Ok(select_pages(result, self.settings.result_type))
    }
}

#[async_trait]
impl DocumentParser for LlamaParseClient {
    async fn parse(&self, path: &Path) -> Result<Vec<String>, ParseError> {
        let job_id = self.upload(path).await?;
        info!(job_id = %job_id, result_type = %self.settings.result_type, "Parse job submitted");

        self.wait_for(&job_id).await?;
        self.fetch_pages(&job_id).await
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ParseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ParseError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Orders pages by page number and picks the requested rendition, falling
/// back to the other one when a page lacks it.
fn select_pages(result: JsonResult, result_type: ResultType) -> Vec<String> {
    let mut pages = result.pages;
    pages.sort_by_key(|p| p.page);
    pages
        .into_iter()
        .map(|p| match result_type {
            ResultType::Markdown => p.md.or(p.text),
            ResultType::Text => p.text.or(p.md),
        })
        .map(Option::unwrap_or_default)
        .collect()
}
