//! Unified error type for gateway operations.

use thiserror::Error;

/// Failure while forwarding a request to the backend.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GatewayError {
    /// Backend unreachable, connection reset, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status where the caller required success.
    #[error("Backend returned HTTP {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code from the backend
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// Backend body was not valid JSON.
    #[error("Invalid JSON from backend: {0}")]
    InvalidJson(String),

    /// Backend URL could not be built.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
