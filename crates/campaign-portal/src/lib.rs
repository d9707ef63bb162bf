//! Campaign Portal - campaign and submission core
//!
//! Client-side core of a two-sided influencer campaign portal: admins run
//! budgeted campaigns with a per-1000-view payout and optional prize
//! competitions, creators submit video links and track their earnings.
//!
//! # Architecture
//!
//! - [`PortalCache`] mirrors the `campaigns` and `submissions` tables and
//!   answers queries locally
//! - [`SessionStore`] holds the signed-in [`Identity`]
//! - [`stats`] derives earnings, statistics and competition standings
//! - [`validation`] rejects bad input before any network call
//!
//! Persistence, auth and file storage belong to the hosted backend, reached
//! through `portal-backend-client`.
//!
//! # Example
//!
//! ```rust,ignore
//! use campaign_portal::{PortalCache, RemoteBackend, RetryPolicy};
//! use std::sync::Arc;
//!
//! let client = BackendClient::new(config)?;
//! let cache = PortalCache::new(Arc::new(RemoteBackend::new(&client)));
//! cache.initialize(&RetryPolicy::default()).await;
//!
//! let stats = cache.get_campaign_statistics("campaign-id").await;
//! ```

// Table rows and identity
pub mod model;

// Row trait shared by cache and backends
pub mod traits;

// Backend seam (remote + in-memory mock)
pub mod backend;

// In-memory mirror of both tables
pub mod cache;

// Signed-in identity
pub mod session;

// Earnings, statistics, ranking
pub mod stats;

// Pre-network input checks
pub mod validation;

// Campaign image uploads
pub mod images;

// Browse and review filters
pub mod browse;

// CSV reports
pub mod export;

// CLI configuration
pub mod config;

// Error types
pub mod error;

pub use backend::{MockBackend, PortalBackend, RemoteBackend};
pub use browse::{CampaignFilter, EarningsFilter, SubmissionFilter};
pub use cache::{LoadOutcome, PortalCache, PortalState, RetryPolicy};
pub use error::{PortalError, Result};
pub use images::{ImageKind, ImageUpload, ImageUploader, UploadedImage};
pub use model::{
    Campaign, CampaignStatus, CampaignUpdate, ContentType, Identity, NewCampaign, NewSubmission,
    Prizes, ProfileUpdate, Role, SocialNetwork, Submission, SubmissionStatus, SubmissionUpdate,
};
pub use session::SessionStore;
pub use traits::Record;
pub use validation::{CampaignDraft, PrizeInputs, SubmissionDraft, ValidationError};

// Re-export from the backend client
pub use portal_backend_client::{BackendClient, BackendConfig, BackendError};
