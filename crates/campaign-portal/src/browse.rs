//! Filters behind the campaign browser and the admin review list.

use std::collections::HashSet;

use crate::model::{Campaign, ContentType, Submission, SubmissionStatus};

/// Creator-facing campaign browser filter. Only active campaigns are listed.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    /// Case-insensitive match on title or description
    pub search: Option<String>,
    pub content_type: Option<ContentType>,
    /// `Some(true)` lists only competitions, `Some(false)` hides them
    pub competition: Option<bool>,
    /// Hide campaigns this creator already submitted to
    pub exclude_joined_by: Option<String>,
}

impl CampaignFilter {
    fn matches(&self, campaign: &Campaign) -> bool {
        if !campaign.is_active() {
            return false;
        }
        if let Some(kind) = self.content_type {
            if campaign.content_type != kind {
                return false;
            }
        }
        if let Some(competition) = self.competition {
            if campaign.has_competition != competition {
                return false;
            }
        }
        match normalized(&self.search) {
            Some(needle) => {
                contains(&campaign.title, &needle) || contains(&campaign.description, &needle)
            }
            None => true,
        }
    }
}

/// Creator earnings dashboard filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarningsFilter {
    /// Narrow to one joined campaign
    pub campaign_id: Option<String>,
    /// Narrow to videos in this review state
    pub status: Option<SubmissionStatus>,
}

impl EarningsFilter {
    pub fn matches_campaign(&self, campaign: &Campaign) -> bool {
        self.campaign_id.as_deref().map_or(true, |id| campaign.id == id)
    }

    pub fn matches_submission(&self, submission: &Submission) -> bool {
        self.campaign_id
            .as_deref()
            .map_or(true, |id| submission.campaign_id == id)
            && self.status.map_or(true, |status| submission.status == status)
    }
}

/// Admin submission review filter
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    /// Case-insensitive match on campaign title, social link or any video link
    pub search: Option<String>,
    pub status: Option<SubmissionStatus>,
}

impl SubmissionFilter {
    fn matches(&self, submission: &Submission, campaign_title: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if submission.status != status {
                return false;
            }
        }
        match normalized(&self.search) {
            Some(needle) => {
                campaign_title.is_some_and(|title| contains(title, &needle))
                    || contains(&submission.social_media_link, &needle)
                    || submission.video_links.iter().any(|link| contains(link, &needle))
            }
            None => true,
        }
    }
}

fn normalized(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Campaigns a creator can browse, in collection order
pub fn browse_campaigns<'a>(
    campaigns: &'a [Campaign],
    submissions: &[Submission],
    filter: &CampaignFilter,
) -> Vec<&'a Campaign> {
    let joined: HashSet<&str> = match &filter.exclude_joined_by {
        Some(creator) => submissions
            .iter()
            .filter(|s| &s.creator_id == creator)
            .map(|s| s.campaign_id.as_str())
            .collect(),
        None => HashSet::new(),
    };

    campaigns
        .iter()
        .filter(|c| !joined.contains(c.id.as_str()))
        .filter(|c| filter.matches(c))
        .collect()
}

/// Submissions matching an admin review filter, in collection order
pub fn filter_submissions<'a>(
    submissions: &'a [Submission],
    campaigns: &[Campaign],
    filter: &SubmissionFilter,
) -> Vec<&'a Submission> {
    submissions
        .iter()
        .filter(|sub| {
            let title = campaigns
                .iter()
                .find(|c| c.id == sub.campaign_id)
                .map(|c| c.title.as_str());
            filter.matches(sub, title)
        })
        .collect()
}
