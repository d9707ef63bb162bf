//! In-memory backend for testing.

use async_trait::async_trait;
use chrono::Utc;
use portal_backend_client::{BackendError, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Mutex;

use super::traits::PortalBackend;
use crate::model::{Campaign, CampaignUpdate, NewCampaign, NewSubmission, Submission, SubmissionUpdate};
use crate::traits::{find_index, Record};

/// Mock backend for testing.
///
/// Rows live in memory and are kept newest first. Ids and timestamps are
/// assigned on insert the way the hosted service does.
pub struct MockBackend {
    campaigns: Mutex<Vec<Campaign>>,
    submissions: Mutex<Vec<Submission>>,
    available: AtomicBool,
    failing_pings: AtomicU32,
    call_count: AtomicU32,
}

impl MockBackend {
    /// Create an empty, reachable backend.
    pub fn new() -> Self {
        Self {
            campaigns: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            failing_pings: AtomicU32::new(0),
            call_count: AtomicU32::new(0),
        }
    }

    /// Seed the campaigns table.
    pub fn with_campaigns(mut self, campaigns: Vec<Campaign>) -> Self {
        self.campaigns = Mutex::new(campaigns);
        self
    }

    /// Seed the submissions table.
    pub fn with_submissions(mut self, submissions: Vec<Submission>) -> Self {
        self.submissions = Mutex::new(submissions);
        self
    }

    /// Set availability. An unavailable backend fails every call.
    pub fn with_available(self, available: bool) -> Self {
        self.set_available(available);
        self
    }

    /// Fail the next `count` pings, then recover.
    pub fn with_failing_pings(self, count: u32) -> Self {
        self.failing_pings.store(count, Ordering::SeqCst);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Get the number of calls made, pings included.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// Current contents of the campaigns table.
    pub async fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.lock().await.clone()
    }

    /// Current contents of the submissions table.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().await.clone()
    }

    fn enter(&self) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::Server {
                status: 503,
                message: "Mock backend disabled".to_string(),
            })
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a stored row from an insert payload plus generated columns
fn materialize<T: Record, B: Serialize>(payload: &B, generated: &[(&str, Value)]) -> Result<T> {
    let mut row = serde_json::to_value(payload)?;
    if let Value::Object(fields) = &mut row {
        for (key, value) in generated {
            fields.insert((*key).to_string(), value.clone());
        }
    }
    Ok(serde_json::from_value(row)?)
}

fn patch_rows<T: Record, P: Serialize>(rows: &mut [T], id: &str, patch: &P) -> Result<Vec<T>> {
    let Some(index) = find_index(rows, id) else {
        return Ok(Vec::new());
    };
    let patched = rows[index]
        .apply_patch(patch)
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    rows[index] = patched.clone();
    Ok(vec![patched])
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

fn new_id() -> Value {
    Value::String(uuid::Uuid::new_v4().to_string())
}

#[async_trait]
impl PortalBackend for MockBackend {
    async fn ping(&self) -> Result<()> {
        self.enter()?;
        let remaining = self.failing_pings.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_pings.store(remaining - 1, Ordering::SeqCst);
            return Err(BackendError::Server {
                status: 503,
                message: "Mock ping failure".to_string(),
            });
        }
        Ok(())
    }

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>> {
        self.enter()?;
        Ok(self.campaigns.lock().await.clone())
    }

    async fn fetch_submissions(&self) -> Result<Vec<Submission>> {
        self.enter()?;
        Ok(self.submissions.lock().await.clone())
    }

    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        self.enter()?;
        let row: Campaign = materialize(
            campaign,
            &[("id", new_id()), ("created_at", now()), ("spent_budget", Value::from(0))],
        )?;
        self.campaigns.lock().await.insert(0, row.clone());
        Ok(row)
    }

    async fn update_campaign(&self, id: &str, patch: &CampaignUpdate) -> Result<Vec<Campaign>> {
        self.enter()?;
        let mut rows = self.campaigns.lock().await;
        patch_rows(&mut rows, id, &Stamped::from((patch, now())))
    }

    async fn delete_campaign(&self, id: &str) -> Result<()> {
        self.enter()?;
        self.campaigns.lock().await.retain(|c| c.id != id);
        Ok(())
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission> {
        self.enter()?;
        let row: Submission = materialize(submission, &[("id", new_id()), ("submitted_at", now())])?;
        self.submissions.lock().await.insert(0, row.clone());
        Ok(row)
    }

    async fn update_submission(&self, id: &str, patch: &SubmissionUpdate) -> Result<Vec<Submission>> {
        self.enter()?;
        let mut rows = self.submissions.lock().await;
        patch_rows(&mut rows, id, &Stamped::from((patch, now())))
    }

    async fn delete_submission(&self, id: &str) -> Result<()> {
        self.enter()?;
        self.submissions.lock().await.retain(|s| s.id != id);
        Ok(())
    }
}

/// Patch plus the `updated_at` column the service's trigger maintains
#[derive(Serialize)]
struct Stamped<'a, P: Serialize> {
    #[serde(flatten)]
    patch: &'a P,
    updated_at: Value,
}

impl<'a, P: Serialize> From<(&'a P, Value)> for Stamped<'a, P> {
    fn from((patch, updated_at): (&'a P, Value)) -> Self {
        Self { patch, updated_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubmissionStatus;

    #[tokio::test]
    async fn test_insert_assigns_id_and_prepends() {
        let backend = MockBackend::new();
        let first = backend
            .insert_submission(&NewSubmission::pending("c1", "u1", "https://a.example/1"))
            .await
            .unwrap();
        let second = backend
            .insert_submission(&NewSubmission::pending("c1", "u2", "https://a.example/2"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let rows = backend.fetch_submissions().await.unwrap();
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_unknown_id_touches_nothing() {
        let backend = MockBackend::new();
        let rows = backend
            .update_submission("missing", &SubmissionUpdate::status(SubmissionStatus::Approved))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_failing_pings_recover() {
        let backend = MockBackend::new().with_failing_pings(2);
        assert!(backend.ping().await.is_err());
        assert!(backend.ping().await.is_err());
        assert!(backend.ping().await.is_ok());
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unavailable_rejects_calls() {
        let backend = MockBackend::new().with_available(false);
        assert!(matches!(
            backend.fetch_campaigns().await,
            Err(BackendError::Server { status: 503, .. })
        ));
    }
}
