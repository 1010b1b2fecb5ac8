pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract;
use crate::state::AppState;
use crate::summarize::handlers::handle_process;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction Gateway
        .route(
            "/api/extract",
            post(handle_extract).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Summarization Gateway
        .route("/api/process", post(handle_process))
        .with_state(state)
}
