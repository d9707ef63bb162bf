//! Rust client for the hosted campaign portal backend
//!
//! Covers the three services the portal delegates to:
//! - REST tables (`campaigns`, `submissions`) via [`TableClient`]
//! - Auth sessions and user metadata via [`AuthClient`]
//! - Object storage for campaign images via [`StorageClient`]
//!
//! # Example
//!
//! ```rust,no_run
//! use portal_backend_client::{BackendClient, BackendConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendClient::new(BackendConfig {
//!     base_url: "https://project.supabase.co".into(),
//!     anon_key: "public-anon-key".into(),
//!     ..Default::default()
//! })?;
//!
//! let campaigns = backend.tables().count("campaigns").await?;
//! let url = backend.storage().public_url("campaign-images", "logos/a.png");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod storage;
pub mod tables;
pub mod types;

// Re-export main types
pub use auth::AuthClient;
pub use client::BackendClient;
pub use error::{BackendError, Result};
pub use storage::StorageClient;
pub use tables::TableClient;
pub use types::*;
