use std::sync::Arc;

use crate::config::Config;
use crate::extraction::parser::DocumentParser;
use crate::extraction::staging::StagingArea;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where uploads wait for the parser. One file per request.
    pub staging: StagingArea,
    /// LlamaParse in production; swapped for fakes in tests.
    pub parser: Arc<dyn DocumentParser>,
    /// The Groq `LlmClient` in production.
    pub generator: Arc<dyn TextGenerator>,
}
