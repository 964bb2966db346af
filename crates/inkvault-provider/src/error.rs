//! Provider error types.

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when calling a generative summarizer.
///
/// None of these are surfaced to the end user as hard failures: the caller
/// falls back to the local statistical summary instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider configured (missing config file, API key, or model).
    #[error("summarizer not configured")]
    Unconfigured,

    /// HTTP request failed (includes client-side timeouts).
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// The API answered but the body wasn't in the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create an API error.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}
