//! Error Types
//!
//! Failures of the REST boundary and of the local draft storage.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote call failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Body did not have the expected `{ data: ... }` shape
    #[error("Unexpected response from {endpoint}: {detail}")]
    UnexpectedResponse { endpoint: String, detail: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Draft storage failures; never fatal, the form falls back to defaults
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("local storage rejected the operation: {0}")]
    Storage(String),

    #[error("stored draft is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
