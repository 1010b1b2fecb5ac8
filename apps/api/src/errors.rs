use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::parser::ParseError;
use crate::extraction::staging::StagingError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file provided")]
    MissingFile,

    #[error("No texts provided for processing")]
    NoTexts,

    #[error("{0}")]
    BadRequest(String),

    #[error("Staging error: {0}")]
    Staging(#[from] StagingError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFile | AppError::NoTexts => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Staging(e) => {
                tracing::error!("Error processing file: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing file".to_string(),
                )
            }
            AppError::Parse(e) => {
                tracing::error!("Error processing file: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing file".to_string(),
                )
            }
            AppError::Generation(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing with Groq: {e}"),
            ),
            AppError::Internal(e) => {
                tracing::error!("Error handling request: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error handling request".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
