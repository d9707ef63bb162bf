//! Error types for the campaign portal

use crate::validation::ValidationError;
use portal_backend_client::BackendError;
use thiserror::Error;

/// Result type for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Portal error types
///
/// Not-found outcomes are not errors: lookups and updates against unknown
/// ids return `None`.
#[derive(Error, Debug)]
pub enum PortalError {
    /// Transport, service or row-level authorization failure
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Input rejected before any network call
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Operation requires a signed-in user
    #[error("Not signed in")]
    NotAuthenticated,
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl PortalError {
    /// Whether retrying the same call could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            PortalError::Backend(BackendError::Server { status, .. }) => *status >= 500,
            PortalError::Backend(e) => e.is_transport(),
            _ => false,
        }
    }
}
