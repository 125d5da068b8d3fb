use super::super::domain::EngagementLevel;
use serde::{Deserialize, Serialize};

/// Profile classification derived from the flat overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileTier {
    KingdomChampion,
    FaithfulServant,
    GrowingDisciple,
    WillingHelper,
    HumbleServant,
}

/// Lower bounds evaluated top-down; the first satisfied bound wins.
const THRESHOLDS: [(f64, ProfileTier); 4] = [
    (4.5, ProfileTier::KingdomChampion),
    (4.0, ProfileTier::FaithfulServant),
    (3.5, ProfileTier::GrowingDisciple),
    (2.5, ProfileTier::WillingHelper),
];

impl ProfileTier {
    pub fn classify(overall_average: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(floor, _)| overall_average >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(ProfileTier::HumbleServant)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProfileTier::KingdomChampion => "Kingdom Champion",
            ProfileTier::FaithfulServant => "Faithful Servant",
            ProfileTier::GrowingDisciple => "Growing Disciple",
            ProfileTier::WillingHelper => "Willing Helper",
            ProfileTier::HumbleServant => "Humble Servant",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ProfileTier::KingdomChampion => {
                "You show strong, consistent evidence of your gifts and a readiness to pour them out for others. People around you are already drawn in by how you serve."
            }
            ProfileTier::FaithfulServant => {
                "Your gifts are clearly active and you use them with steady commitment. You are a dependable presence wherever you choose to serve."
            }
            ProfileTier::GrowingDisciple => {
                "Your gifts are taking shape and you are eager to put them to work. Regular opportunities to serve will help you grow in confidence."
            }
            ProfileTier::WillingHelper => {
                "You have a heart to help and are still discovering where your gifts fit best. Trying a few serving roles will bring your strengths into focus."
            }
            ProfileTier::HumbleServant => {
                "You are at the start of discovering your gifts. Quiet, behind-the-scenes service alongside others is a great place to begin."
            }
        }
    }

    pub const fn serving_style(self) -> &'static str {
        match self {
            ProfileTier::KingdomChampion => "Leads and mobilizes others into ministry",
            ProfileTier::FaithfulServant => "Takes ownership of ongoing ministry roles",
            ProfileTier::GrowingDisciple => "Serves regularly with a mentor or team",
            ProfileTier::WillingHelper => "Joins short-term projects and events",
            ProfileTier::HumbleServant => "Supports others through simple acts of service",
        }
    }

    pub const fn engagement_level(self) -> EngagementLevel {
        match self {
            ProfileTier::KingdomChampion
            | ProfileTier::FaithfulServant
            | ProfileTier::GrowingDisciple => EngagementLevel::High,
            ProfileTier::WillingHelper => EngagementLevel::Moderate,
            ProfileTier::HumbleServant => EngagementLevel::Supportive,
        }
    }
}
