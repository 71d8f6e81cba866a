//! Errors surfaced by the AI path.

use thiserror::Error;

/// Both variants are recoverable: the recommender answers them with the
/// deterministic fallback.
#[derive(Debug, Error)]
pub enum AiError {
    /// Network failure, non-success status or malformed top-level body.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// The assistant text held no usable recommendation payload.
    #[error("invalid LLM response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::RequestFailed(err.to_string())
    }
}
