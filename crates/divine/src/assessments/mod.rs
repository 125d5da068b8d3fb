//! Spiritual gifts assessments: question bank, paginated sessions, the profile
//! calculator, and the service/router that persist scored profiles.

pub mod bank;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use bank::{QuestionBank, QuestionBankError, QuestionTier};
pub use domain::{
    AssessmentDepth, EngagementLevel, Gift, GiftScore, LikertRangeError, LikertScore, MemberId,
    ProfileRecord, Question, QuestionId, ResponseSet, SpiritualProfile, UnknownDepth, UnknownGift,
};
pub use repository::{ProfileRepository, ProfileSummaryView, RepositoryError};
pub use router::{assessment_router, ScoreRequest, SubmitRequest};
pub use scoring::{
    calculate_profile, score_assessment, AssessmentOutcome, InvalidInputReason, ProfileTier,
    ScoringError, TOP_GIFT_LIMIT,
};
pub use service::{AssessmentService, AssessmentServiceError};
pub use session::{AssessmentProgress, AssessmentSession, SessionError};
