//! Axum route handler for the Summarization Gateway.

use std::error::Error as _;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::models::summary::{ProcessRequest, ProcessResponse};
use crate::state::AppState;
use crate::summarize::prompts::build_prompt;

/// POST /api/process
///
/// Builds the prompt from the submitted texts and config, makes one
/// generation call and returns its text unmodified.
pub async fn handle_process(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if request.texts.is_empty() {
        warn!("Rejecting process request without texts");
        return Err(AppError::NoTexts);
    }

    info!(
        texts = request.texts.len(),
        subjects = ?request.subjects,
        source_language = %request.source_language,
        target_language = %request.target_language,
        "Processing request"
    );

    let profile = state.config.generation_profile;
    let prompt = build_prompt(
        profile,
        &request.texts,
        &request.subjects,
        &request.source_language,
        &request.target_language,
    );
    let params = profile.params();

    info!(model = %params.model, %profile, prompt_chars = prompt.len(), "Calling Groq API");
    let resume = state
        .generator
        .generate(profile.system_prompt(), &prompt, &params)
        .await
        .map_err(|e| {
            log_generation_failure(&e);
            AppError::Generation(e)
        })?;

    info!(resume_chars = resume.len(), "Groq API response received");
    Ok(Json(ProcessResponse { resume }))
}

/// Logs the error with its whole `source()` chain.
fn log_generation_failure(e: &LlmError) {
    error!(kind = ?e, "Generation failed: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        error!("  caused by: {cause}");
        source = cause.source();
    }
}
