//! Rows of the `campaigns` and `submissions` tables and the signed-in identity

mod campaign;
mod identity;
mod submission;

pub use campaign::{
    Campaign, CampaignStatus, CampaignUpdate, ContentType, NewCampaign, Prizes, SocialNetwork,
};
pub use identity::{Identity, ProfileUpdate, Role, UNKNOWN_USER_NAME};
pub use submission::{NewSubmission, Submission, SubmissionStatus, SubmissionUpdate};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
