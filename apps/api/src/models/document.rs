use serde::{Deserialize, Serialize};

/// Body of a successful `POST /api/extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    pub filename: String,
}

/// A successfully parsed upload, as held by the intake session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub filename: String,
    pub text: String,
}

impl From<ExtractResponse> for ExtractedDocument {
    fn from(r: ExtractResponse) -> Self {
        Self {
            filename: r.filename,
            text: r.text,
        }
    }
}

/// Body of any failed gateway call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
