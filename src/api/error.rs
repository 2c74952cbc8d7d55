//! API Error Types
//!
//! Errors that can occur while talking to the chat server. Every variant is
//! recoverable from the controller's point of view: a failed exchange is
//! surfaced as a notification and the form is released.

use thiserror::Error;

/// Errors returned by [`ChatApi`](super::ChatApi) implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered 2xx but with `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The response body could not be parsed
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, unserializable body)
    #[error("Request build error: {0}")]
    Build(String),
}

impl ApiError {
    /// Whether the failure happened before the server saw the request
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Build(_))
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
