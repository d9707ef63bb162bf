//! Input checks that run before any network call.
//!
//! Drafts carry raw form input (amounts as text) and turn into insert
//! payloads only once every rule passes.

use reqwest::Url;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{
    Campaign, CampaignStatus, ContentType, NewCampaign, NewSubmission, Prizes, SocialNetwork,
};

/// Largest accepted image upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

const FILE_LINK_HOSTS: [&str; 2] = ["drive.google.com", "docs.google.com"];

/// Rejected input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a non-negative amount, got {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("All prize amounts must be filled for competition")]
    IncompletePrizes,

    #[error("Only Google Drive or Docs links are accepted: {0}")]
    InvalidFileLink(String),

    #[error("At least one social network must be allowed")]
    NoAllowedPlatforms,

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("{0} videos are not accepted by this campaign")]
    PlatformNotAllowed(SocialNetwork),

    #[error("File size must be at most 5MB, got {0} bytes")]
    FileTooLarge(usize),

    #[error("Unsupported image type {0}; use JPEG, PNG, GIF or WebP")]
    UnsupportedImageType(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must not be empty")]
    EmptyPassword,
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Parse a non-negative amount. Blank input counts as missing.
fn parse_amount(field: &'static str, value: &str) -> ValidationResult<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    match Decimal::from_str(trimmed) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Raw prize inputs, places one through five
#[derive(Debug, Clone, Default)]
pub struct PrizeInputs {
    pub first: String,
    pub second: String,
    pub third: String,
    pub fourth: String,
    pub fifth: String,
}

impl PrizeInputs {
    fn parse(&self) -> ValidationResult<Prizes> {
        let places = [
            ("first prize", &self.first),
            ("second prize", &self.second),
            ("third prize", &self.third),
            ("fourth prize", &self.fourth),
            ("fifth prize", &self.fifth),
        ];
        if places.iter().any(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::IncompletePrizes);
        }
        Ok(Prizes {
            first: parse_amount(places[0].0, places[0].1)?,
            second: parse_amount(places[1].0, places[1].1)?,
            third: parse_amount(places[2].0, places[2].1)?,
            fourth: parse_amount(places[3].0, places[3].1)?,
            fifth: parse_amount(places[4].0, places[4].1)?,
        })
    }
}

/// Campaign authoring form
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub content_type: ContentType,
    /// Payout per 1000 views
    pub rate: String,
    pub total_budget: String,
    pub file_links: Vec<String>,
    pub has_competition: bool,
    pub prizes: PrizeInputs,
    /// `None` accepts every network
    pub allowed_platforms: Option<Vec<SocialNetwork>>,
}

impl CampaignDraft {
    /// Check the draft and build the insert payload for `user_id`.
    ///
    /// Blank file links are dropped. Prizes are kept only for competitions.
    pub fn validate(&self, user_id: &str) -> ValidationResult<NewCampaign> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("requirements", &self.requirements)?;
        let rate = parse_amount("earnings per 1k views", &self.rate)?;
        let total_budget = parse_amount("total budget", &self.total_budget)?;

        let prizes = if self.has_competition {
            Some(self.prizes.parse()?)
        } else {
            None
        };

        let file_links: Vec<String> = self
            .file_links
            .iter()
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(bad) = file_links
            .iter()
            .find(|link| !FILE_LINK_HOSTS.iter().any(|host| link.contains(host)))
        {
            return Err(ValidationError::InvalidFileLink(bad.clone()));
        }

        if matches!(&self.allowed_platforms, Some(platforms) if platforms.is_empty()) {
            return Err(ValidationError::NoAllowedPlatforms);
        }

        Ok(NewCampaign {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: self.requirements.trim().to_string(),
            content_type: self.content_type,
            status: CampaignStatus::Active,
            total_budget,
            earnings_per_1k_views: rate,
            user_id: user_id.to_string(),
            file_links,
            logo_url: None,
            thumbnail_url: None,
            has_competition: self.has_competition,
            prizes,
            allowed_platforms: self.allowed_platforms.clone(),
        })
    }
}

/// Video submission form
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub platform: Option<SocialNetwork>,
    pub url: String,
}

impl SubmissionDraft {
    /// Check the draft against `campaign` and build a pending submission.
    pub fn validate(&self, campaign: &Campaign, creator_id: &str) -> ValidationResult<NewSubmission> {
        let platform = self.platform.ok_or(ValidationError::MissingField("platform"))?;
        require("video URL", &self.url)?;
        let url = self.url.trim();
        Url::parse(url).map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;
        if !campaign.accepts(platform) {
            return Err(ValidationError::PlatformNotAllowed(platform));
        }
        Ok(NewSubmission::pending(&campaign.id, creator_id, url))
    }
}

/// Check an image before upload
pub fn validate_image(size: usize, mime_type: &str) -> ValidationResult<()> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::FileTooLarge(size));
    }
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        return Err(ValidationError::UnsupportedImageType(mime_type.to_string()));
    }
    Ok(())
}

pub fn validate_password(new_password: &str, confirm: &str) -> ValidationResult<()> {
    if new_password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if new_password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
