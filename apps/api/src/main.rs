use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lectern::config::Config;
use lectern::extraction::parser::{LlamaParseClient, LlamaParseSettings};
use lectern::extraction::staging::StagingArea;
use lectern::llm_client::LlmClient;
use lectern::routes::build_router;
use lectern::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Validate configuration before anything else; missing API keys are fatal.
    let config = Config::from_env().context("invalid configuration")?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting lectern v{}", env!("CARGO_PKG_VERSION"));

    // Transient upload storage
    let staging = StagingArea::new(config.uploads_dir.clone());
    staging.ensure_dir().await?;
    info!("Staging uploads in {}", staging.dir().display());

    // Document parser
    let parser = LlamaParseClient::new(LlamaParseSettings {
        api_key: config.llama_cloud_api_key.clone(),
        base_url: config.llama_parse_base_url.clone(),
        result_type: config.llama_parse_result_type,
        poll_interval: Duration::from_millis(config.llama_parse_poll_interval_ms),
        max_polls: config.llama_parse_max_polls,
    })?;
    info!(
        "Parser client initialized (result type: {})",
        config.llama_parse_result_type
    );

    // LLM client
    let generator = LlmClient::new(config.groq_api_key.clone(), config.groq_base_url.clone())?;
    let profile = config.generation_profile;
    info!(
        "LLM client initialized (profile: {profile}, model: {})",
        profile.params().model
    );

    let state = AppState {
        config: config.clone(),
        staging,
        parser: Arc::new(parser),
        generator: Arc::new(generator),
    };

    // The browser front-end is served from a different origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
