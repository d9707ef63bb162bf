use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;

/// Kind of content a campaign asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// User-generated content
    #[default]
    Ugc,
    /// Clips cut from existing material
    Clipping,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Ugc => "ugc",
            ContentType::Clipping => "clipping",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ugc" => Ok(ContentType::Ugc),
            "clipping" => Ok(ContentType::Clipping),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

/// Campaign lifecycle state. Admins may move between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CampaignStatus::Active),
            "completed" => Ok(CampaignStatus::Completed),
            "cancelled" => Ok(CampaignStatus::Cancelled),
            other => Err(format!("unknown campaign status: {}", other)),
        }
    }
}

/// Social networks a campaign can accept videos from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Instagram,
    Tiktok,
    Youtube,
}

impl SocialNetwork {
    pub const ALL: [SocialNetwork; 3] = [
        SocialNetwork::Instagram,
        SocialNetwork::Tiktok,
        SocialNetwork::Youtube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "instagram",
            SocialNetwork::Tiktok => "tiktok",
            SocialNetwork::Youtube => "youtube",
        }
    }
}

impl fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SocialNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instagram" => Ok(SocialNetwork::Instagram),
            "tiktok" => Ok(SocialNetwork::Tiktok),
            "youtube" => Ok(SocialNetwork::Youtube),
            other => Err(format!("unknown social network: {}", other)),
        }
    }
}

/// Prize table of a competition, places one through five
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prizes {
    pub first: Decimal,
    pub second: Decimal,
    pub third: Decimal,
    pub fourth: Decimal,
    pub fifth: Decimal,
}

impl Prizes {
    /// Prize for a 1-based place, if the table has one
    pub fn for_place(&self, place: usize) -> Option<Decimal> {
        match place {
            1 => Some(self.first),
            2 => Some(self.second),
            3 => Some(self.third),
            4 => Some(self.fourth),
            5 => Some(self.fifth),
            _ => None,
        }
    }

    pub fn total(&self) -> Decimal {
        self.first + self.second + self.third + self.fourth + self.fifth
    }
}

/// A budgeted content request created by an admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements: String,
    pub content_type: ContentType,
    pub status: CampaignStatus,
    pub total_budget: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spent_budget: Decimal,
    /// Currency paid per 1000 qualifying views
    pub earnings_per_1k_views: Decimal,
    /// Owning admin
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_links: Vec<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_competition: bool,
    #[serde(default)]
    pub prizes: Option<Prizes>,
    /// `None` on rows created before networks were restricted: all accepted
    #[serde(default)]
    pub allowed_platforms: Option<Vec<SocialNetwork>>,
}

impl Campaign {
    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// Whether creators may submit videos from `network`
    pub fn accepts(&self, network: SocialNetwork) -> bool {
        match &self.allowed_platforms {
            Some(platforms) => platforms.contains(&network),
            None => true,
        }
    }

    /// Prize table, only when the competition is switched on
    pub fn competition_prizes(&self) -> Option<&Prizes> {
        if self.has_competition {
            self.prizes.as_ref()
        } else {
            None
        }
    }
}

/// Insert payload for a new campaign. Id and timestamps are assigned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub content_type: ContentType,
    pub status: CampaignStatus,
    pub total_budget: Decimal,
    pub earnings_per_1k_views: Decimal,
    pub user_id: String,
    pub file_links: Vec<String>,
    pub logo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub has_competition: bool,
    pub prizes: Option<Prizes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_platforms: Option<Vec<SocialNetwork>>,
}

impl NewCampaign {
    /// Attach uploaded image URLs
    pub fn with_images(mut self, logo_url: Option<String>, thumbnail_url: Option<String>) -> Self {
        self.logo_url = logo_url;
        self.thumbnail_url = thumbnail_url;
        self
    }
}

/// Partial update of a campaign; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_budget: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings_per_1k_views: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_competition: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prizes: Option<Prizes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_platforms: Option<Vec<SocialNetwork>>,
}

impl CampaignUpdate {
    pub fn status(status: CampaignStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Budget edit as done from the campaign details view
    pub fn budget(total_budget: Decimal, earnings_per_1k_views: Decimal) -> Self {
        Self {
            total_budget: Some(total_budget),
            earnings_per_1k_views: Some(earnings_per_1k_views),
            ..Default::default()
        }
    }
}
