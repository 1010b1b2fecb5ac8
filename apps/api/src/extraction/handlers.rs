//! Axum route handler for the Extraction Gateway.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pages::join_pages;
use crate::models::document::ExtractResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    bytes: Bytes,
}

/// POST /api/extract
///
/// Stages the `file` field, hands it to the parser and returns the paged
/// text. The staged copy is released whether or not parsing succeeds.
/// A body that is not multipart at all is a request-level failure (500).
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Internal(anyhow::anyhow!(e.body_text())))?;
    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or(AppError::MissingFile)?;

    info!(filename = %upload.filename, bytes = upload.bytes.len(), "Processing file");

    let staged = state.staging.stage(&upload.filename, &upload.bytes).await?;
    let parsed = state.parser.parse(staged.path()).await;
    staged.release().await;

    let pages = parsed?;
    info!(filename = %upload.filename, pages = pages.len(), "Text extracted");

    Ok(Json(ExtractResponse {
        text: join_pages(&pages),
        filename: upload.filename,
    }))
}

/// Returns the first `file` field; other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.into()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        return Ok(Some(Upload { filename, bytes }));
    }
    Ok(None)
}
