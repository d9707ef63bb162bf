//! In-memory mirror of the `campaigns` and `submissions` tables
//!
//! Reads are answered locally. Mutations go to the backend first and only
//! touch local state once the backend has answered, so a failed call leaves
//! the cache exactly as it was.

mod loader;
mod state;

pub use loader::{LoadOutcome, RetryPolicy};
pub use state::PortalState;

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error, info};

use crate::backend::PortalBackend;
use crate::error::Result;
use crate::model::{
    Campaign, CampaignUpdate, NewCampaign, NewSubmission, Submission, SubmissionUpdate,
};
use crate::stats::{earnings_for_views, CampaignStatistics, CompetitionStanding};
use crate::traits::{find_index, Record};

/// Put the first returned row in place of the local one.
///
/// An empty response means nothing matched the id. A row missing locally is
/// returned as-is without being added.
fn merge_returned<T: Record>(rows: &mut [T], id: &str, returned: Vec<T>) -> Option<T> {
    let row = returned.into_iter().next()?;
    if let Some(index) = find_index(rows, id) {
        rows[index] = row.clone();
    }
    Some(row)
}

/// Campaign and submission cache over a [`PortalBackend`]
pub struct PortalCache {
    backend: Arc<dyn PortalBackend>,
    state: RwLock<PortalState>,
}

impl PortalCache {
    /// Create an empty cache. Call [`PortalCache::initialize`] to load it.
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(PortalState::default()),
        }
    }

    /// Initial load of both tables.
    ///
    /// Never fails: once the policy is exhausted the collections are left
    /// empty and a degraded outcome is returned.
    pub async fn initialize(&self, policy: &RetryPolicy) -> LoadOutcome {
        let (loaded, outcome) = loader::load(self.backend.as_ref(), policy).await;
        *self.state.write().await = loaded;
        outcome
    }

    /// Connectivity probe with the same retry policy. Returns attempts used.
    pub async fn check_connection(&self, policy: &RetryPolicy) -> Result<u32> {
        loader::probe(self.backend.as_ref(), policy).await
    }

    /// Replace local campaigns with a fresh fetch, newest first.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns = self.backend.fetch_campaigns().await.map_err(|e| {
            error!(error = %e, "Failed to fetch campaigns");
            e
        })?;
        self.state.write().await.campaigns = campaigns.clone();
        debug!(count = campaigns.len(), "Campaigns refreshed");
        Ok(campaigns)
    }

    /// Replace local submissions with a fresh fetch, newest first.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let submissions = self.backend.fetch_submissions().await.map_err(|e| {
            error!(error = %e, "Failed to fetch submissions");
            e
        })?;
        self.state.write().await.submissions = submissions.clone();
        debug!(count = submissions.len(), "Submissions refreshed");
        Ok(submissions)
    }

    /// Read access for queries that should not clone
    pub async fn read(&self) -> RwLockReadGuard<'_, PortalState> {
        self.state.read().await
    }

    pub async fn snapshot(&self) -> PortalState {
        self.state.read().await.clone()
    }

    pub async fn get_campaign(&self, id: &str) -> Option<Campaign> {
        self.state.read().await.get_campaign(id).cloned()
    }

    pub async fn get_submissions_by_campaign(&self, campaign_id: &str) -> Vec<Submission> {
        let state = self.state.read().await;
        state.submissions_by_campaign(campaign_id).into_iter().cloned().collect()
    }

    pub async fn get_submissions_by_creator(&self, creator_id: &str) -> Vec<Submission> {
        let state = self.state.read().await;
        state.submissions_by_creator(creator_id).into_iter().cloned().collect()
    }

    pub async fn get_campaigns_for_creator(&self, creator_id: &str) -> Vec<Campaign> {
        let state = self.state.read().await;
        state.campaigns_for_creator(creator_id).into_iter().cloned().collect()
    }

    pub async fn get_total_earnings_by_creator(&self, creator_id: &str) -> Decimal {
        self.state.read().await.total_earnings_by_creator(creator_id)
    }

    pub async fn get_campaign_statistics(&self, campaign_id: &str) -> CampaignStatistics {
        self.state.read().await.campaign_statistics(campaign_id)
    }

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        let created = self.backend.insert_campaign(campaign).await.map_err(|e| {
            error!(title = %campaign.title, error = %e, "Failed to create campaign");
            e
        })?;
        self.state.write().await.campaigns.insert(0, created.clone());
        info!(id = %created.id, title = %created.title, "Campaign created");
        Ok(created)
    }

    /// `Ok(None)` when no visible campaign has `id`.
    pub async fn update_campaign(&self, id: &str, patch: &CampaignUpdate) -> Result<Option<Campaign>> {
        let returned = self.backend.update_campaign(id, patch).await.map_err(|e| {
            error!(id, error = %e, "Failed to update campaign");
            e
        })?;
        let mut state = self.state.write().await;
        let merged = merge_returned(&mut state.campaigns, id, returned);
        if merged.is_none() {
            debug!(id, "Campaign update matched no rows");
        }
        Ok(merged)
    }

    /// Remove a campaign. Its submissions stay in place.
    pub async fn delete_campaign(&self, id: &str) -> Result<()> {
        self.backend.delete_campaign(id).await.map_err(|e| {
            error!(id, error = %e, "Failed to delete campaign");
            e
        })?;
        self.state.write().await.campaigns.retain(|c| c.id != id);
        info!(id, "Campaign deleted");
        Ok(())
    }

    pub async fn create_submission(&self, submission: &NewSubmission) -> Result<Submission> {
        let created = self.backend.insert_submission(submission).await.map_err(|e| {
            error!(campaign_id = submission.campaign_id(), error = %e, "Failed to create submission");
            e
        })?;
        self.state.write().await.submissions.insert(0, created.clone());
        info!(id = %created.id, campaign_id = %created.campaign_id, "Submission created");
        Ok(created)
    }

    /// `Ok(None)` when no visible submission has `id`.
    pub async fn update_submission(&self, id: &str, patch: &SubmissionUpdate) -> Result<Option<Submission>> {
        let returned = self.backend.update_submission(id, patch).await.map_err(|e| {
            error!(id, error = %e, "Failed to update submission");
            e
        })?;
        let mut state = self.state.write().await;
        let merged = merge_returned(&mut state.submissions, id, returned);
        if merged.is_none() {
            debug!(id, "Submission update matched no rows");
        }
        Ok(merged)
    }

    pub async fn delete_submission(&self, id: &str) -> Result<()> {
        self.backend.delete_submission(id).await.map_err(|e| {
            error!(id, error = %e, "Failed to delete submission");
            e
        })?;
        self.state.write().await.submissions.retain(|s| s.id != id);
        info!(id, "Submission deleted");
        Ok(())
    }

    /// Set a submission's views and the earnings they pay at its campaign's rate.
    ///
    /// `Ok(None)` when the submission or its campaign is not cached.
    pub async fn record_views(&self, submission_id: &str, views: u64) -> Result<Option<Submission>> {
        let rate = {
            let state = self.state.read().await;
            let Some(submission) = state.get_submission(submission_id) else {
                return Ok(None);
            };
            match state.get_campaign(&submission.campaign_id) {
                Some(campaign) => campaign.earnings_per_1k_views,
                None => return Ok(None),
            }
        };
        let earnings = earnings_for_views(views, rate);
        debug!(submission_id, views, %earnings, "Recording views");
        self.update_submission(submission_id, &SubmissionUpdate::views(views, earnings))
            .await
    }

    /// Rank a competition and write rank and prize to every paid place.
    ///
    /// Submissions that held a placement but no longer earn a prize are
    /// cleared. Returns the standings as written; `Ok(None)` for an unknown
    /// campaign.
    pub async fn award_competition(&self, campaign_id: &str) -> Result<Option<Vec<CompetitionStanding>>> {
        let (standings, placed_before) = {
            let state = self.state.read().await;
            let Some(standings) = state.competition_standings(campaign_id) else {
                return Ok(None);
            };
            let placed_before: HashSet<String> = state
                .submissions_by_campaign(campaign_id)
                .into_iter()
                .filter(|s| s.competition_rank.is_some() || s.competition_prize.is_some())
                .map(|s| s.id.clone())
                .collect();
            (standings, placed_before)
        };

        let mut placed = 0usize;
        let mut cleared = 0usize;
        for standing in &standings {
            let patch = match standing.prize {
                Some(prize) => {
                    placed += 1;
                    SubmissionUpdate::placement(standing.rank, prize)
                }
                None if placed_before.contains(&standing.submission_id) => {
                    cleared += 1;
                    SubmissionUpdate::clear_placement()
                }
                None => continue,
            };
            self.update_submission(&standing.submission_id, &patch).await?;
        }
        info!(campaign_id, placed, cleared, "Competition awarded");
        Ok(Some(standings))
    }
}
