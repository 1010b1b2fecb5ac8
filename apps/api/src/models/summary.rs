use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_LANGUAGE: &str = "English";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Accepts any JSON for `texts`: a non-array becomes an empty list so the
/// handler answers it like an empty one. Non-string items are kept as their
/// JSON rendering.
fn texts_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let texts = match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(texts)
}

/// Body of `POST /api/process`. Every field is optional on the wire; the
/// handler rejects an empty `texts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    #[serde(default, deserialize_with = "texts_or_empty")]
    pub texts: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default = "default_language")]
    pub source_language: String,
    #[serde(default = "default_language")]
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub resume: String,
}
