use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::domain::{
    Gift, LikertScore, MemberId, ProfileRecord, Question, QuestionId, ResponseSet,
};
use crate::assessments::repository::{ProfileRepository, RepositoryError};
use crate::assessments::{assessment_router, AssessmentService, QuestionBank};

pub(super) const FIVE_GIFTS: [Gift; 5] = [
    Gift::Leadership,
    Gift::Teaching,
    Gift::Mercy,
    Gift::Service,
    Gift::Giving,
];

pub(super) fn score(value: u8) -> LikertScore {
    LikertScore::new(value).expect("valid likert score")
}

/// `per_gift` questions for each gift, ids `<gift>-<n>` in gift order.
pub(super) fn questions_for(gifts: &[Gift], per_gift: usize) -> Vec<Question> {
    gifts
        .iter()
        .flat_map(|gift| {
            (1..=per_gift).map(move |n| {
                Question::new(
                    format!("{}-{n}", gift.label().to_lowercase()),
                    *gift,
                    format!("{gift} statement {n}"),
                )
            })
        })
        .collect()
}

pub(super) fn answer_all(questions: &[Question], value: u8) -> ResponseSet {
    questions
        .iter()
        .map(|question| (question.id.clone(), score(value)))
        .collect()
}

pub(super) fn responses(pairs: &[(&str, u8)]) -> ResponseSet {
    pairs
        .iter()
        .map(|(id, value)| (QuestionId::from(*id), score(*value)))
        .collect()
}

pub(super) fn member(id: &str) -> MemberId {
    MemberId(id.to_string())
}

pub(super) fn bank() -> Arc<QuestionBank> {
    Arc::new(QuestionBank::built_in().expect("built-in bank loads"))
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(bank(), repository.clone(), 5);
    (service, repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<MemberId, Vec<ProfileRecord>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self) -> usize {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl ProfileRepository for MemoryRepository {
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .entry(record.member_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn latest(&self, member_id: &MemberId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .get(member_id)
            .and_then(|history| history.last().cloned()))
    }

    fn history(&self, member_id: &MemberId) -> Result<Vec<ProfileRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .get(member_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn save(&self, _record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _member_id: &MemberId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _member_id: &MemberId) -> Result<Vec<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
