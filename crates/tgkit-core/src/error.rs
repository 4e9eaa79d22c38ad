//! Error types shared across the tgkit crates.

use thiserror::Error;

/// Error type for outbound API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with an `ok: false` envelope.
    #[error("telegram API error: {description}")]
    Telegram {
        /// Human-readable description supplied by the API.
        description: String,
    },

    /// The transport failed before a response envelope was produced.
    #[error("transport error: {0}")]
    Transport(String),

    /// Failed to serialize request parameters or deserialize a response.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful envelope arrived without the expected `result` field.
    #[error("response envelope carried no result")]
    MissingResult,
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
