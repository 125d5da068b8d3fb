use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::domain::{AssessmentDepth, Gift, Question, QuestionId, UnknownGift};

const BUILT_IN_BANK: &str = include_str!("../../assets/question_bank.csv");

/// Whether a question belongs to the quick assessment or only the expanded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTier {
    Quick,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BankEntry {
    question: Question,
    tier: QuestionTier,
}

/// Immutable question configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    entries: Vec<BankEntry>,
}

impl QuestionBank {
    pub fn built_in() -> Result<Self, QuestionBankError> {
        Self::from_reader(BUILT_IN_BANK.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, QuestionBankError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| QuestionBankError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let bank = Self::from_reader(file)?;
        debug!(path = %path.display(), questions = bank.len(), "loaded question bank");
        Ok(bank)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();
        let mut seen = BTreeSet::new();

        for (index, record) in csv_reader.deserialize::<BankRow>().enumerate() {
            let row = record?;
            let line = index + 2;

            if row.id.is_empty() {
                return Err(QuestionBankError::MissingId { line });
            }
            let gift: Gift = row
                .gift
                .parse()
                .map_err(|source| QuestionBankError::UnknownGift { line, source })?;
            let tier = match row.tier.to_ascii_lowercase().as_str() {
                "quick" => QuestionTier::Quick,
                "expanded" => QuestionTier::Expanded,
                _ => {
                    return Err(QuestionBankError::UnknownTier {
                        line,
                        tier: row.tier,
                    })
                }
            };
            if !seen.insert(row.id.clone()) {
                return Err(QuestionBankError::DuplicateId(QuestionId(row.id)));
            }

            entries.push(BankEntry {
                question: Question::new(row.id, gift, row.prompt),
                tier,
            });
        }

        let bank = Self { entries };
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), QuestionBankError> {
        if self.entries.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        for gift in self.gifts() {
            let has_quick = self
                .entries
                .iter()
                .any(|entry| entry.question.gift == gift && entry.tier == QuestionTier::Quick);
            if !has_quick {
                return Err(QuestionBankError::NoQuickQuestion(gift));
            }
        }

        Ok(())
    }

    /// Ordered questions for the requested depth. Expanded includes the quick tier.
    pub fn questions(&self, depth: AssessmentDepth) -> Vec<Question> {
        self.entries
            .iter()
            .filter(|entry| match depth {
                AssessmentDepth::Quick => entry.tier == QuestionTier::Quick,
                AssessmentDepth::Expanded => true,
            })
            .map(|entry| entry.question.clone())
            .collect()
    }

    pub fn tier(&self, id: &QuestionId) -> Option<QuestionTier> {
        self.entries
            .iter()
            .find(|entry| &entry.question.id == id)
            .map(|entry| entry.tier)
    }

    /// Gifts covered by the bank, in order of first appearance.
    pub fn gifts(&self) -> Vec<Gift> {
        let mut gifts = Vec::new();
        for entry in &self.entries {
            if !gifts.contains(&entry.question.gift) {
                gifts.push(entry.question.gift);
            }
        }
        gifts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct BankRow {
    id: String,
    gift: String,
    tier: String,
    prompt: String,
}

/// Failure loading or validating the question configuration.
#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("unable to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed question bank: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: question id is required")]
    MissingId { line: usize },
    #[error("line {line}: {source}")]
    UnknownGift {
        line: usize,
        #[source]
        source: UnknownGift,
    },
    #[error("line {line}: unknown tier '{tier}' (expected quick or expanded)")]
    UnknownTier { line: usize, tier: String },
    #[error("question id '{0}' appears more than once")]
    DuplicateId(QuestionId),
    #[error("question bank is empty")]
    Empty,
    #[error("gift {0} has no quick-tier question")]
    NoQuickQuestion(Gift),
}
