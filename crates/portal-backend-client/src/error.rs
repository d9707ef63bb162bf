//! Error types for the backend client

use thiserror::Error;

/// Backend client error
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service returned a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Service rejected the credentials or row-level policy denied access
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Service answered with a body we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Whether the failure happened at the transport level (no response).
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Http(_))
    }
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
