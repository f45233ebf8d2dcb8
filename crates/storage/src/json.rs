//! JSON-backed question source.
//!
//! The file is an array of records shaped like
//! `{ "id", "domain", "question", "options": [{ "key", "value" }], "correctAnswer": { "key", "value" } }`.
//! Records are decoded as-is; content is not validated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tutor_core::model::{Mcq, QuestionSet};

use crate::repository::{QuestionRepository, StorageError};

/// Sample dataset shipped with the application.
pub const BUNDLED_QUESTIONS: &str = include_str!("../data/mcqs.json");

#[derive(Debug, Clone)]
enum Source {
    Bundled,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct JsonQuestionRepository {
    source: Source,
}

impl JsonQuestionRepository {
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            source: Source::Bundled,
        }
    }

    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }
}

#[async_trait]
impl QuestionRepository for JsonQuestionRepository {
    async fn load_questions(&self) -> Result<QuestionSet, StorageError> {
        let questions = match &self.source {
            Source::Bundled => parse_questions(BUNDLED_QUESTIONS)?,
            Source::File(path) => parse_questions(&read_file(path).await?)?,
        };
        Ok(QuestionSet::new(questions))
    }
}

/// Decode a JSON array of question records.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not a valid array of records.
pub fn parse_questions(raw: &str) -> Result<Vec<Mcq>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

async fn read_file(path: &Path) -> Result<String, StorageError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(e.to_string()),
    })
}
