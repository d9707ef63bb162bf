//! Core trait for table backends.

use async_trait::async_trait;
use portal_backend_client::Result;

use crate::model::{Campaign, CampaignUpdate, NewCampaign, NewSubmission, Submission, SubmissionUpdate};

/// Row-level operations the cache needs from the hosted service.
///
/// Updates return every row the service touched; an empty vector means no
/// visible row had that id.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Cheap round trip proving the service is reachable.
    async fn ping(&self) -> Result<()>;

    /// All visible campaigns, newest first.
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>>;

    /// All visible submissions, newest first.
    async fn fetch_submissions(&self) -> Result<Vec<Submission>>;

    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<Campaign>;

    async fn update_campaign(&self, id: &str, patch: &CampaignUpdate) -> Result<Vec<Campaign>>;

    async fn delete_campaign(&self, id: &str) -> Result<()>;

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission>;

    async fn update_submission(&self, id: &str, patch: &SubmissionUpdate) -> Result<Vec<Submission>>;

    async fn delete_submission(&self, id: &str) -> Result<()>;
}
