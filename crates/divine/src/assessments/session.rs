use serde::Serialize;

use super::domain::{
    AssessmentDepth, LikertScore, Question, QuestionId, ResponseSet, SpiritualProfile,
};
use super::scoring::{calculate_profile, ScoringError};

/// Progress through a paginated assessment attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AssessmentProgress {
    NotStarted,
    InProgress { page: usize },
    Submitted,
    Scored { profile: SpiritualProfile },
}

impl AssessmentProgress {
    pub const fn label(&self) -> &'static str {
        match self {
            AssessmentProgress::NotStarted => "not_started",
            AssessmentProgress::InProgress { .. } => "in_progress",
            AssessmentProgress::Submitted => "submitted",
            AssessmentProgress::Scored { .. } => "scored",
        }
    }
}

/// One member's pass through a question set, page by page.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    depth: AssessmentDepth,
    questions: Vec<Question>,
    page_size: usize,
    responses: ResponseSet,
    progress: AssessmentProgress,
}

impl AssessmentSession {
    pub fn new(
        depth: AssessmentDepth,
        questions: Vec<Question>,
        page_size: usize,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        if page_size == 0 {
            return Err(SessionError::InvalidPageSize);
        }

        Ok(Self {
            depth,
            questions,
            page_size,
            responses: ResponseSet::new(),
            progress: AssessmentProgress::NotStarted,
        })
    }

    pub fn depth(&self) -> AssessmentDepth {
        self.depth
    }

    pub fn progress(&self) -> &AssessmentProgress {
        &self.progress
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn page_count(&self) -> usize {
        self.questions.len().div_ceil(self.page_size)
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.progress {
            AssessmentProgress::NotStarted => {
                self.progress = AssessmentProgress::InProgress { page: 0 };
                Ok(())
            }
            _ => Err(self.invalid("start")),
        }
    }

    /// Questions shown on the current page.
    pub fn current_page(&self) -> Result<&[Question], SessionError> {
        let page = self.page()?;
        Ok(self.page_questions(page))
    }

    pub fn record(&mut self, id: &QuestionId, score: LikertScore) -> Result<(), SessionError> {
        self.page()?;
        if !self.questions.iter().any(|question| &question.id == id) {
            return Err(SessionError::UnknownQuestion(id.clone()));
        }
        self.responses.record(id.clone(), score);
        Ok(())
    }

    /// Moves to the next page once every question on the current page is answered.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        let page = self.page()?;
        if page + 1 >= self.page_count() {
            return Err(self.invalid("advance past the last page"));
        }
        self.ensure_page_complete(page)?;
        self.progress = AssessmentProgress::InProgress { page: page + 1 };
        Ok(page + 1)
    }

    pub fn back(&mut self) -> Result<usize, SessionError> {
        let page = self.page()?.saturating_sub(1);
        self.progress = AssessmentProgress::InProgress { page };
        Ok(page)
    }

    pub fn submit(&mut self) -> Result<&ResponseSet, SessionError> {
        let page = self.page()?;
        if page + 1 != self.page_count() {
            return Err(self.invalid("submit before the last page"));
        }
        self.ensure_page_complete(page)?;
        self.progress = AssessmentProgress::Submitted;
        Ok(&self.responses)
    }

    pub fn score(&mut self) -> Result<&SpiritualProfile, SessionError> {
        if self.progress != AssessmentProgress::Submitted {
            return Err(self.invalid("score"));
        }
        let profile = calculate_profile(&self.questions, &self.responses)?;
        self.progress = AssessmentProgress::Scored { profile };
        match &self.progress {
            AssessmentProgress::Scored { profile } => Ok(profile),
            _ => Err(self.invalid("score")),
        }
    }

    fn page(&self) -> Result<usize, SessionError> {
        match self.progress {
            AssessmentProgress::InProgress { page } => Ok(page),
            _ => Err(SessionError::NotInProgress {
                state: self.progress.label(),
            }),
        }
    }

    fn page_questions(&self, page: usize) -> &[Question] {
        let start = (page * self.page_size).min(self.questions.len());
        let end = (start + self.page_size).min(self.questions.len());
        &self.questions[start..end]
    }

    fn ensure_page_complete(&self, page: usize) -> Result<(), SessionError> {
        let missing: Vec<QuestionId> = self
            .page_questions(page)
            .iter()
            .filter(|question| !self.responses.contains(&question.id))
            .map(|question| question.id.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SessionError::PageIncomplete { page, missing })
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.progress.label(),
        }
    }
}

/// Misuse of the session state machine or an incomplete page.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("assessment has no questions")]
    NoQuestions,
    #[error("page size must be at least 1")]
    InvalidPageSize,
    #[error("cannot {action} while assessment is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("assessment is {state}, not in progress")]
    NotInProgress { state: &'static str },
    #[error("question '{0}' is not part of this assessment")]
    UnknownQuestion(QuestionId),
    #[error("page {} has unanswered questions: {}", .page + 1, join_ids(.missing))]
    PageIncomplete {
        page: usize,
        missing: Vec<QuestionId>,
    },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(QuestionId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
