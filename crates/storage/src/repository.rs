use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tutor_core::model::{Mcq, QuestionSet};

use crate::json::JsonQuestionRepository;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question file not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-only source of the exam question set.
///
/// Implementations are asked once at startup; the returned set is shared for
/// the rest of the process.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load the full ordered question set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or decoded.
    async fn load_questions(&self) -> Result<QuestionSet, StorageError>;
}

/// Fixed in-memory question source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: QuestionSet,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(questions: Vec<Mcq>) -> Self {
        Self {
            questions: QuestionSet::new(questions),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn load_questions(&self) -> Result<QuestionSet, StorageError> {
        Ok(self.questions.clone())
    }
}

/// Question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(questions: Vec<Mcq>) -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new(questions)),
        }
    }

    /// The dataset compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            questions: Arc::new(JsonQuestionRepository::bundled()),
        }
    }

    /// A JSON dataset read from disk.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(JsonQuestionRepository::from_path(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::{AnswerOption, QuestionId};

    fn build_mcq(id: u32) -> Mcq {
        Mcq::new(
            QuestionId::new(id),
            "Renal",
            format!("Q{id}"),
            vec![AnswerOption::new("A", "a"), AnswerOption::new("B", "b")],
            AnswerOption::new("A", "a"),
        )
    }

    #[tokio::test]
    async fn in_memory_preserves_order() {
        let storage = Storage::in_memory(vec![build_mcq(3), build_mcq(1), build_mcq(2)]);
        let set = storage.questions.load_questions().await.unwrap();
        let ids = set.iter().map(|m| m.id().value()).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn repeated_loads_share_the_same_records() {
        let repo = InMemoryRepository::new(vec![build_mcq(1)]);
        let first = repo.load_questions().await.unwrap();
        let second = repo.load_questions().await.unwrap();
        assert!(std::ptr::eq(first.as_slice(), second.as_slice()));
    }
}
