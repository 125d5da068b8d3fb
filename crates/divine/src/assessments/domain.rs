use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for the platform member owning a profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

/// Closed set of spiritual gift categories a question can measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gift {
    Administration,
    Leadership,
    Teaching,
    Wisdom,
    Faith,
    Mercy,
    Service,
    Giving,
    Hospitality,
    Evangelism,
    Encouragement,
    Intercession,
}

impl Gift {
    pub const ALL: [Gift; 12] = [
        Gift::Administration,
        Gift::Leadership,
        Gift::Teaching,
        Gift::Wisdom,
        Gift::Faith,
        Gift::Mercy,
        Gift::Service,
        Gift::Giving,
        Gift::Hospitality,
        Gift::Evangelism,
        Gift::Encouragement,
        Gift::Intercession,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Gift::Administration => "Administration",
            Gift::Leadership => "Leadership",
            Gift::Teaching => "Teaching",
            Gift::Wisdom => "Wisdom",
            Gift::Faith => "Faith",
            Gift::Mercy => "Mercy",
            Gift::Service => "Service",
            Gift::Giving => "Giving",
            Gift::Hospitality => "Hospitality",
            Gift::Evangelism => "Evangelism",
            Gift::Encouragement => "Encouragement",
            Gift::Intercession => "Intercession",
        }
    }
}

impl fmt::Display for Gift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gift {
    type Err = UnknownGift;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Gift::ALL
            .iter()
            .copied()
            .find(|gift| gift.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGift(trimmed.to_string()))
    }
}

/// Raised when a gift name does not belong to the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gift category '{0}'")]
pub struct UnknownGift(pub String);

/// Single Likert statement tagged with the gift it measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub prompt: String,
    pub gift: Gift,
}

impl Question {
    pub fn new(id: impl Into<String>, gift: Gift, prompt: impl Into<String>) -> Self {
        Self {
            id: QuestionId(id.into()),
            prompt: prompt.into(),
            gift,
        }
    }
}

/// Agreement value on the 1 (strongly disagree) to 5 (strongly agree) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertScore(u8);

impl LikertScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, LikertRangeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LikertRangeError(value))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LikertScore {
    type Error = LikertRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LikertScore> for u8 {
    fn from(score: LikertScore) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("likert score {0} outside the 1-5 agreement scale")]
pub struct LikertRangeError(pub u8);

/// Partial mapping of question ids to the answers given in one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<QuestionId, LikertScore>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: QuestionId, score: LikertScore) -> Option<LikertScore> {
        self.0.insert(id, score)
    }

    pub fn get(&self, id: &QuestionId) -> Option<LikertScore> {
        self.0.get(id).copied()
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.0.keys()
    }
}

impl FromIterator<(QuestionId, LikertScore)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, LikertScore)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Aggregate of the answered questions for one gift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftScore {
    pub gift: Gift,
    pub total_score: u32,
    pub question_count: u32,
    pub average_score: f64,
}

/// Coarse serving intensity bucket derived from the overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementLevel {
    High,
    Moderate,
    Supportive,
}

impl EngagementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EngagementLevel::High => "High",
            EngagementLevel::Moderate => "Moderate",
            EngagementLevel::Supportive => "Supportive",
        }
    }
}

/// Output artifact shown to the member and persisted on their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualProfile {
    pub top_gifts: Vec<Gift>,
    pub profile_label: String,
    pub profile_description: String,
    pub serving_style: String,
    pub average_score: f64,
    pub engagement_level: EngagementLevel,
}

/// Which slice of the question bank an attempt covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentDepth {
    Quick,
    Expanded,
}

impl AssessmentDepth {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentDepth::Quick => "quick",
            AssessmentDepth::Expanded => "expanded",
        }
    }
}

impl FromStr for AssessmentDepth {
    type Err = UnknownDepth;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "expanded" | "deep" => Ok(Self::Expanded),
            other => Err(UnknownDepth(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assessment depth '{0}' (expected quick or expanded)")]
pub struct UnknownDepth(pub String);

/// Persisted result of a scored assessment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub member_id: MemberId,
    pub depth: AssessmentDepth,
    pub profile: SpiritualProfile,
    pub scored_at: DateTime<Utc>,
}
