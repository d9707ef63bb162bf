use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;

/// Review state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            other => Err(format!("unknown submission status: {}", other)),
        }
    }
}

/// A creator's entry into a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub campaign_id: String,
    pub creator_id: String,
    pub social_media_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_links: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub status: SubmissionStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub earnings: Decimal,
    #[serde(default)]
    pub competition_rank: Option<u32>,
    #[serde(default)]
    pub competition_prize: Option<Decimal>,
}

impl Submission {
    pub fn is_approved(&self) -> bool {
        self.status == SubmissionStatus::Approved
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }
}

/// Insert payload for a submission.
///
/// Only [`NewSubmission::pending`] builds one, so every new submission starts
/// pending with zero views and zero earnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubmission {
    campaign_id: String,
    creator_id: String,
    social_media_link: String,
    video_links: Vec<String>,
    status: SubmissionStatus,
    views: u64,
    earnings: Decimal,
}

impl NewSubmission {
    pub fn pending(
        campaign_id: impl Into<String>,
        creator_id: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        let url = video_url.into();
        Self {
            campaign_id: campaign_id.into(),
            creator_id: creator_id.into(),
            video_links: vec![url.clone()],
            social_media_link: url,
            status: SubmissionStatus::Pending,
            views: 0,
            earnings: Decimal::ZERO,
        }
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn creator_id(&self) -> &str {
        &self.creator_id
    }

    pub fn social_media_link(&self) -> &str {
        &self.social_media_link
    }
}

/// Partial update of a submission; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_links: Option<Vec<String>>,
    /// `Some(None)` writes an explicit null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_rank: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_prize: Option<Option<Decimal>>,
}

impl SubmissionUpdate {
    pub fn status(status: SubmissionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Views together with the earnings they produce
    pub fn views(views: u64, earnings: Decimal) -> Self {
        Self {
            views: Some(views),
            earnings: Some(earnings),
            ..Default::default()
        }
    }

    pub fn placement(rank: u32, prize: Decimal) -> Self {
        Self {
            competition_rank: Some(Some(rank)),
            competition_prize: Some(Some(prize)),
            ..Default::default()
        }
    }

    /// Null out rank and prize of a submission that is no longer placed
    pub fn clear_placement() -> Self {
        Self {
            competition_rank: Some(None),
            competition_prize: Some(None),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pending_submission_payload() {
        let new = NewSubmission::pending("c1", "u1", "https://tiktok.com/@a/video/1");
        let json = serde_json::to_value(&new).unwrap();

        assert_eq!(json["status"], "pending");
        assert_eq!(json["views"], 0);
        assert_eq!(json["social_media_link"], "https://tiktok.com/@a/video/1");
        assert_eq!(json["video_links"], serde_json::json!(["https://tiktok.com/@a/video/1"]));
    }

    #[test]
    fn test_row_with_null_counters() {
        let row = serde_json::json!({
            "id": "s1",
            "campaign_id": "c1",
            "creator_id": "u1",
            "social_media_link": "https://youtube.com/shorts/x",
            "video_links": null,
            "submitted_at": "2024-05-02T08:30:00Z",
            "status": "approved",
            "views": null,
            "earnings": null
        });
        let sub: Submission = serde_json::from_value(row).unwrap();

        assert!(sub.is_approved());
        assert_eq!(sub.views, 0);
        assert_eq!(sub.earnings, Decimal::ZERO);
        assert!(sub.video_links.is_empty());
        assert!(sub.competition_rank.is_none());
    }

    #[test]
    fn test_views_update_carries_earnings() {
        let json = serde_json::to_value(SubmissionUpdate::views(2500, dec!(30))).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert_eq!(json["views"], 2500);
    }

    #[test]
    fn test_clear_placement_sends_nulls() {
        let json = serde_json::to_value(SubmissionUpdate::clear_placement()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"competition_rank": null, "competition_prize": null})
        );

        let json = serde_json::to_value(SubmissionUpdate::placement(2, dec!(50))).unwrap();
        assert_eq!(json["competition_rank"], 2);
    }
}
