//! Error types for the restaurant service.
//!
//! Errors are handled at the boundary where they occur:
//! - [`ApiError`] is rendered straight back to the HTTP caller.
//! - [`SubscribeError`] is logged by the subscriber task and never propagated.
//! - [`ServiceError`] covers startup; only `Bind` ends the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::config::ConfigError;

/// Plain-text HTTP error returned to a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error message written as the response body
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Malformed request body
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    /// Wrong HTTP method for the route
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// Request body over the configured limit
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Payload exceeds {} bytes", limit),
        )
    }

    /// Request exceeded the inbound deadline
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            StatusCode::REQUEST_TIMEOUT,
            format!("Request timeout: {}", operation.into()),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

/// Transport failure of the broker registration call
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// Broker refused the connection or could not be resolved
    #[error("cannot connect to broker at {url}: {reason}")]
    Connection { url: String, reason: String },

    /// Broker did not answer within the configured deadline
    #[error("broker did not respond within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Any other transport-level failure
    #[error("broker request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Service lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration rejected at startup
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listening socket could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// HTTP server stopped with an error
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    /// Subscriber could not be constructed
    #[error("subscriber setup failed: {0}")]
    Subscriber(#[from] SubscribeError),
}
