//! Named generation profiles: model, sampling parameters and prompt pair.
//!
//! `Structured` is the default and asks for a sectioned, hierarchical
//! resume. `Classic` keeps the earlier numbered-list prompt on Mixtral.

use std::fmt;
use std::str::FromStr;

use crate::llm_client::GenerationParams;
use crate::summarize::prompts::{
    CLASSIC_SYSTEM, CLASSIC_TEMPLATE, STRUCTURED_SYSTEM, STRUCTURED_TEMPLATE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationProfile {
    Classic,
    #[default]
    Structured,
}

impl GenerationProfile {
    pub fn params(self) -> GenerationParams {
        match self {
            GenerationProfile::Classic => GenerationParams {
                model: "mixtral-8x7b-32768".to_string(),
                temperature: 0.7,
                max_tokens: 4000,
                top_p: 1.0,
            },
            GenerationProfile::Structured => GenerationParams {
                model: "llama-3.3-70b-versatile".to_string(),
                temperature: 0.5,
                max_tokens: 8000,
                top_p: 0.9,
            },
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            GenerationProfile::Classic => CLASSIC_SYSTEM,
            GenerationProfile::Structured => STRUCTURED_SYSTEM,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            GenerationProfile::Classic => CLASSIC_TEMPLATE,
            GenerationProfile::Structured => STRUCTURED_TEMPLATE,
        }
    }
}

impl fmt::Display for GenerationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationProfile::Classic => f.write_str("classic"),
            GenerationProfile::Structured => f.write_str("structured"),
        }
    }
}

impl FromStr for GenerationProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GenerationProfile::Classic),
            "structured" => Ok(GenerationProfile::Structured),
            other => Err(format!("expected 'classic' or 'structured', got '{other}'")),
        }
    }
}
