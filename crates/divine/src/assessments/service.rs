use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::bank::QuestionBank;
use super::domain::{
    AssessmentDepth, MemberId, ProfileRecord, Question, ResponseSet, SpiritualProfile,
};
use super::repository::{ProfileRepository, RepositoryError};
use super::scoring::{calculate_profile, ScoringError};
use super::session::{AssessmentSession, SessionError};

/// Service composing the question bank, profile calculator, and profile repository.
pub struct AssessmentService<R> {
    bank: Arc<QuestionBank>,
    repository: Arc<R>,
    page_size: usize,
}

impl<R> AssessmentService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(bank: Arc<QuestionBank>, repository: Arc<R>, page_size: usize) -> Self {
        Self {
            bank,
            repository,
            page_size,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn questions(&self, depth: AssessmentDepth) -> Vec<Question> {
        self.bank.questions(depth)
    }

    /// Score an arbitrary question set without persisting anything.
    pub fn score(
        &self,
        questions: &[Question],
        responses: &ResponseSet,
    ) -> Result<SpiritualProfile, AssessmentServiceError> {
        Ok(calculate_profile(questions, responses)?)
    }

    /// Score a member's responses against the bank and store the resulting profile.
    pub fn submit(
        &self,
        member_id: MemberId,
        depth: AssessmentDepth,
        responses: &ResponseSet,
    ) -> Result<ProfileRecord, AssessmentServiceError> {
        let questions = self.bank.questions(depth);
        let profile = calculate_profile(&questions, responses).inspect_err(|err| {
            warn!(member = %member_id.0, depth = depth.label(), %err, "assessment rejected");
        })?;

        let record = ProfileRecord {
            member_id,
            depth,
            profile,
            scored_at: Utc::now(),
        };
        let stored = self.repository.save(record)?;

        info!(
            member = %stored.member_id.0,
            depth = depth.label(),
            label = stored.profile.profile_label.as_str(),
            "stored spiritual gifts profile"
        );
        Ok(stored)
    }

    pub fn latest(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<ProfileRecord>, AssessmentServiceError> {
        Ok(self.repository.latest(member_id)?)
    }

    pub fn history(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<ProfileRecord>, AssessmentServiceError> {
        Ok(self.repository.history(member_id)?)
    }

    pub fn start_session(
        &self,
        depth: AssessmentDepth,
    ) -> Result<AssessmentSession, AssessmentServiceError> {
        let mut session = AssessmentSession::new(depth, self.bank.questions(depth), self.page_size)?;
        session.start()?;
        Ok(session)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
