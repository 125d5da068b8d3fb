//! Spiritual gifts profile calculator.
//!
//! Every caller (HTTP routes, sessions, the CLI) scores through
//! [`score_assessment`]; there is no second implementation to drift from.
//! Unanswered questions are excluded from both the per-gift totals and the
//! per-gift question counts.

mod policy;
mod rules;

pub use policy::ProfileTier;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{GiftScore, Question, QuestionId, ResponseSet, SpiritualProfile};

/// Number of gifts surfaced on a profile.
pub const TOP_GIFT_LIMIT: usize = 3;

/// Full scoring result, keeping the per-gift breakdown for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub profile: SpiritualProfile,
    pub tier: ProfileTier,
    pub gift_scores: Vec<GiftScore>,
    pub overall_average: f64,
    pub answered: u32,
    pub unanswered: u32,
}

/// Scores a response set, returning only the member-facing profile.
pub fn calculate_profile(
    questions: &[Question],
    responses: &ResponseSet,
) -> Result<SpiritualProfile, ScoringError> {
    score_assessment(questions, responses).map(|outcome| outcome.profile)
}

pub fn score_assessment(
    questions: &[Question],
    responses: &ResponseSet,
) -> Result<AssessmentOutcome, ScoringError> {
    validate_questions(questions)?;

    let aggregation = rules::aggregate_gifts(questions, responses);
    if aggregation.answered == 0 {
        return Err(ScoringError::InvalidInput {
            reason: InvalidInputReason::NoResponses,
        });
    }

    let known: BTreeSet<&QuestionId> = questions.iter().map(|question| &question.id).collect();
    let stray = responses.ids().filter(|id| !known.contains(id)).count();
    if stray > 0 {
        debug!(stray, "ignoring responses for questions outside the set");
    }

    let overall_average = f64::from(aggregation.answered_total) / f64::from(aggregation.answered);
    let tier = ProfileTier::classify(overall_average);
    let top_gifts = rules::rank_top_gifts(&aggregation.gift_scores, TOP_GIFT_LIMIT);

    let profile = SpiritualProfile {
        top_gifts,
        profile_label: tier.label().to_string(),
        profile_description: tier.description().to_string(),
        serving_style: tier.serving_style().to_string(),
        average_score: rules::round_to_tenth(aggregation.answered_total, aggregation.answered),
        engagement_level: tier.engagement_level(),
    };

    debug!(
        answered = aggregation.answered,
        unanswered = aggregation.unanswered,
        overall_average,
        label = profile.profile_label.as_str(),
        "scored spiritual gifts assessment"
    );

    Ok(AssessmentOutcome {
        profile,
        tier,
        gift_scores: aggregation.gift_scores,
        overall_average,
        answered: aggregation.answered,
        unanswered: aggregation.unanswered,
    })
}

fn validate_questions(questions: &[Question]) -> Result<(), ScoringError> {
    if questions.is_empty() {
        return Err(ScoringError::InvalidInput {
            reason: InvalidInputReason::NoQuestions,
        });
    }

    let mut seen = BTreeSet::new();
    for question in questions {
        if !seen.insert(&question.id) {
            return Err(ScoringError::InvalidInput {
                reason: InvalidInputReason::DuplicateQuestion(question.id.clone()),
            });
        }
    }

    Ok(())
}

/// Error raised when a response set cannot produce a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: InvalidInputReason },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInputReason {
    #[error("no questions provided")]
    NoQuestions,
    #[error("no responses provided")]
    NoResponses,
    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(QuestionId),
}
