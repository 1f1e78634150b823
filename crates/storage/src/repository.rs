use async_trait::async_trait;
use quiz_core::model::{Difficulty, Question, QuestionBank, QuestionDraft, QuestionId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid question record {id}: {source}")]
    InvalidRecord {
        id: u64,
        #[source]
        source: quiz_core::Error,
    },

    #[error("invalid question bank: {0}")]
    InvalidBank(#[source] quiz_core::Error),
}

/// Wire/persisted shape of a question.
///
/// Mirrors the domain `Question` so sources can deserialize without leaking
/// format concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: u64,
    #[serde(alias = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correctOptionIndex", alias = "correctAnswer")]
    pub correct_option: usize,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_option: question.correct_option(),
            difficulty: question.difficulty(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the record fails validation.
    pub fn into_question(self) -> Result<Question, StorageError> {
        let id = self.id;
        QuestionDraft {
            text: self.text,
            options: self.options,
            correct_option: self.correct_option,
            difficulty: self.difficulty,
            explanation: self.explanation,
        }
        .validate(QuestionId::new(id))
        .map_err(|e| StorageError::InvalidRecord {
            id,
            source: e.into(),
        })
    }
}

/// Validate records and assemble them into a bank, keeping their order.
///
/// # Errors
///
/// Returns `StorageError::InvalidRecord` for the first bad record, or
/// `StorageError::InvalidBank` if the bank itself is rejected.
pub fn records_into_bank(records: Vec<QuestionRecord>) -> Result<QuestionBank, StorageError> {
    let questions = records
        .into_iter()
        .map(QuestionRecord::into_question)
        .collect::<Result<Vec<_>, _>>()?;
    QuestionBank::new(questions).map_err(|e| StorageError::InvalidBank(e.into()))
}

/// Fetch-like collaborator that hands out the question bank.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load the full, ordered question bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read or fails validation.
    async fn fetch_bank(&self) -> Result<QuestionBank, StorageError>;
}

/// Fixed in-memory question list; clones share the same records.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    records: Arc<[QuestionRecord]>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn with_records(records: Vec<QuestionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }
}

#[async_trait]
impl QuestionSource for InMemoryRepository {
    async fn fetch_bank(&self) -> Result<QuestionBank, StorageError> {
        debug!(count = self.records.len(), "serving in-memory question bank");
        records_into_bank(self.records.to_vec())
    }
}

/// Reads a JSON array of [`QuestionRecord`]s from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonFileSource {
    async fn fetch_bank(&self) -> Result<QuestionBank, StorageError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(self.path.display().to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        let records: Vec<QuestionRecord> = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded question bank file");
        records_into_bank(records)
    }
}

/// Wraps a source and answers only after a fixed delay, like the mock
/// service calls of a browser front-end.
#[derive(Clone)]
pub struct DelayedSource<S> {
    inner: S,
    delay: Duration,
}

impl<S> DelayedSource<S> {
    #[must_use]
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl<S: QuestionSource> QuestionSource for DelayedSource<S> {
    async fn fetch_bank(&self) -> Result<QuestionBank, StorageError> {
        if !self.delay.is_zero() {
            debug!(delay = ?self.delay, "simulating service latency");
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch_bank().await
    }
}

#[async_trait]
impl QuestionSource for Arc<dyn QuestionSource> {
    async fn fetch_bank(&self) -> Result<QuestionBank, StorageError> {
        (**self).fetch_bank().await
    }
}

/// Question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
}

impl Storage {
    /// The built-in question set, served from memory.
    #[must_use]
    pub fn seeded() -> Self {
        Self::in_memory(crate::seed::default_records())
    }

    #[must_use]
    pub fn in_memory(records: Vec<QuestionRecord>) -> Self {
        let questions: Arc<dyn QuestionSource> =
            Arc::new(InMemoryRepository::with_records(records));
        Self { questions }
    }

    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let questions: Arc<dyn QuestionSource> = Arc::new(JsonFileSource::new(path));
        Self { questions }
    }

    /// Delay every fetch by `delay`; a zero delay leaves the source as is.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        if delay.is_zero() {
            return self;
        }
        let questions: Arc<dyn QuestionSource> =
            Arc::new(DelayedSource::new(self.questions, delay));
        Self { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, difficulty: Difficulty) -> QuestionRecord {
        QuestionRecord {
            id,
            text: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: 2,
            difficulty,
            explanation: "c it is".into(),
        }
    }

    #[tokio::test]
    async fn in_memory_repository_preserves_order() {
        let repo = InMemoryRepository::with_records(vec![
            record(3, Difficulty::Hard),
            record(1, Difficulty::Easy),
        ]);
        let bank = repo.fetch_bank().await.unwrap();
        let ids: Vec<u64> = bank.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn clones_serve_the_same_records() {
        let repo = InMemoryRepository::with_records(vec![
            record(1, Difficulty::Easy),
            record(2, Difficulty::Medium),
        ]);
        let copy = repo.clone();
        assert!(std::ptr::eq(repo.records(), copy.records()));

        let first = repo.fetch_bank().await.unwrap();
        let second = copy.fetch_bank().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.get(1).unwrap().difficulty(), Difficulty::Medium);
    }

    #[tokio::test]
    async fn invalid_record_reports_its_id() {
        let mut bad = record(7, Difficulty::Easy);
        bad.options.truncate(2);
        let repo = InMemoryRepository::with_records(vec![record(1, Difficulty::Easy), bad]);

        let err = repo.fetch_bank().await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord { id: 7, .. }));
    }

    #[tokio::test]
    async fn empty_repository_is_an_invalid_bank() {
        let err = InMemoryRepository::with_records(Vec::new())
            .fetch_bank()
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidBank(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_source_waits_before_answering() {
        let source = DelayedSource::new(
            InMemoryRepository::with_records(vec![record(1, Difficulty::Easy)]),
            Duration::from_millis(800),
        );
        let started = tokio::time::Instant::now();
        let bank = source.fetch_bank().await.unwrap();
        assert_eq!(bank.len(), 1);
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[test]
    fn record_accepts_source_field_names() {
        let json = r#"{
            "id": 4,
            "question": "2 + 2?",
            "options": ["3", "4", "5", "22"],
            "correctOptionIndex": 1,
            "difficulty": "easy"
        }"#;
        let rec: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.correct_option, 1);
        assert_eq!(rec.explanation, "");
        let q = rec.into_question().unwrap();
        assert_eq!(q.text(), "2 + 2?");
    }

    #[test]
    fn record_round_trips_through_domain_question() {
        let q = record(9, Difficulty::Hard).into_question().unwrap();
        assert_eq!(QuestionRecord::from_question(&q), record(9, Difficulty::Hard));
    }
}
