use serde::Serialize;

use super::domain::{EngagementLevel, Gift, MemberId, ProfileRecord};

/// Storage abstraction for scored profiles so the service can be exercised in isolation.
pub trait ProfileRepository: Send + Sync {
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError>;
    fn latest(&self, member_id: &MemberId) -> Result<Option<ProfileRecord>, RepositoryError>;
    fn history(&self, member_id: &MemberId) -> Result<Vec<ProfileRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact projection of a stored profile for listings and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummaryView {
    pub member_id: MemberId,
    pub depth: &'static str,
    pub profile_label: String,
    pub top_gifts: Vec<Gift>,
    pub engagement_level: EngagementLevel,
    pub average_score: f64,
    pub scored_at: String,
}

impl ProfileRecord {
    pub fn summary_view(&self) -> ProfileSummaryView {
        ProfileSummaryView {
            member_id: self.member_id.clone(),
            depth: self.depth.label(),
            profile_label: self.profile.profile_label.clone(),
            top_gifts: self.profile.top_gifts.clone(),
            engagement_level: self.profile.engagement_level,
            average_score: self.profile.average_score,
            scored_at: self.scored_at.to_rfc3339(),
        }
    }
}
