use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::extraction::parser::ResultType;
use crate::summarize::profiles::GenerationProfile;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_LLAMA_PARSE_BASE_URL: &str = "https://api.cloud.llamaindex.ai";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in environment variables")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
/// Validated once at startup; `main` refuses to serve if this fails.
#[derive(Debug, Clone)]
pub struct Config {
    pub llama_cloud_api_key: String,
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub llama_parse_base_url: String,
    pub llama_parse_result_type: ResultType,
    pub llama_parse_poll_interval_ms: u64,
    pub llama_parse_max_polls: u32,
    pub groq_base_url: String,
    pub generation_profile: GenerationProfile,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uploads_dir = match lookup("UPLOADS_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("uploads"),
        };

        Ok(Config {
            llama_cloud_api_key: require(&lookup, "LLAMA_CLOUD_API_KEY")?,
            groq_api_key: require(&lookup, "GROQ_API_KEY")?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            uploads_dir,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            llama_parse_base_url: lookup("LLAMA_PARSE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLAMA_PARSE_BASE_URL.to_string()),
            llama_parse_result_type: parse_or(
                &lookup,
                "LLAMA_PARSE_RESULT_TYPE",
                ResultType::Markdown,
            )?,
            llama_parse_poll_interval_ms: parse_or(&lookup, "LLAMA_PARSE_POLL_INTERVAL_MS", 1000)?,
            llama_parse_max_polls: parse_or(&lookup, "LLAMA_PARSE_MAX_POLLS", 600)?,
            groq_base_url: lookup("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            generation_profile: parse_or(
                &lookup,
                "GENERATION_PROFILE",
                GenerationProfile::Structured,
            )?,
        })
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            var: key,
            reason: e.to_string(),
            value,
        }),
    }
}
