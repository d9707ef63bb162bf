//! Backend over the hosted REST table endpoint.

use async_trait::async_trait;
use portal_backend_client::{BackendClient, Order, Result, TableClient};

use super::traits::PortalBackend;
use crate::model::{Campaign, CampaignUpdate, NewCampaign, NewSubmission, Submission, SubmissionUpdate};
use crate::traits::Record;

/// [`PortalBackend`] backed by a [`TableClient`]
#[derive(Clone)]
pub struct RemoteBackend {
    tables: TableClient,
}

impl RemoteBackend {
    pub fn new(client: &BackendClient) -> Self {
        Self {
            tables: client.tables(),
        }
    }

    async fn fetch<T: Record>(&self) -> Result<Vec<T>> {
        self.tables
            .select_ordered(T::table(), &Order::desc(T::order_column()))
            .await
    }
}

#[async_trait]
impl PortalBackend for RemoteBackend {
    async fn ping(&self) -> Result<()> {
        self.tables.count(Campaign::table()).await.map(|_| ())
    }

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>> {
        self.fetch().await
    }

    async fn fetch_submissions(&self) -> Result<Vec<Submission>> {
        self.fetch().await
    }

    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        self.tables.insert_one(Campaign::table(), campaign).await
    }

    async fn update_campaign(&self, id: &str, patch: &CampaignUpdate) -> Result<Vec<Campaign>> {
        self.tables.update_by_id(Campaign::table(), id, patch).await
    }

    async fn delete_campaign(&self, id: &str) -> Result<()> {
        self.tables.delete_by_id(Campaign::table(), id).await
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission> {
        self.tables.insert_one(Submission::table(), submission).await
    }

    async fn update_submission(&self, id: &str, patch: &SubmissionUpdate) -> Result<Vec<Submission>> {
        self.tables.update_by_id(Submission::table(), id, patch).await
    }

    async fn delete_submission(&self, id: &str) -> Result<()> {
        self.tables.delete_by_id(Submission::table(), id).await
    }
}
