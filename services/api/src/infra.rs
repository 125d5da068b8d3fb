use divine::assessments::{
    AssessmentDepth, MemberId, ProfileRecord, ProfileRepository, QuestionBank, QuestionBankError,
    RepositoryError,
};
use divine::config::AssessmentConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<MemberId, Vec<ProfileRecord>>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .entry(record.member_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn latest(&self, member_id: &MemberId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(member_id)
            .and_then(|history| history.last().cloned()))
    }

    fn history(&self, member_id: &MemberId) -> Result<Vec<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(member_id).cloned().unwrap_or_default())
    }
}

/// Loads the configured question bank, falling back to the built-in set.
pub(crate) fn load_question_bank(
    config: &AssessmentConfig,
) -> Result<QuestionBank, QuestionBankError> {
    let bank = match &config.question_bank {
        Some(path) => QuestionBank::from_path(path)?,
        None => QuestionBank::built_in()?,
    };
    let source = config
        .question_bank
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    info!(
        quick = bank.questions(AssessmentDepth::Quick).len(),
        expanded = bank.questions(AssessmentDepth::Expanded).len(),
        %source,
        "question bank ready"
    );
    Ok(bank)
}

pub(crate) fn parse_depth(raw: &str) -> Result<AssessmentDepth, String> {
    raw.parse::<AssessmentDepth>().map_err(|err| err.to_string())
}
