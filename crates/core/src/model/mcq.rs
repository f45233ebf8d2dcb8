use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// One lettered choice of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: String,
    pub value: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A multiple-choice exam question tagged with its clinical domain.
///
/// Records come straight from the dataset and are not validated: duplicate
/// option keys or a correct answer missing from `options` are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
    id: QuestionId,
    domain: String,
    question: String,
    options: Vec<AnswerOption>,
    correct_answer: AnswerOption,
}

impl Mcq {
    #[must_use]
    pub fn new(
        id: QuestionId,
        domain: impl Into<String>,
        question: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_answer: AnswerOption,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            question: question.into(),
            options,
            correct_answer,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &AnswerOption {
        &self.correct_answer
    }

    /// First option carrying `key`, if any.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|opt| opt.key == key)
    }

    #[must_use]
    pub fn is_correct(&self, key: &str) -> bool {
        self.correct_answer.key == key
    }
}

/// Shared, immutable, ordered question sequence.
///
/// Cloning is cheap; every clone points at the same records.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet(Arc<[Mcq]>);

impl QuestionSet {
    #[must_use]
    pub fn new(questions: Vec<Mcq>) -> Self {
        Self(questions.into())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Mcq] {
        &self.0
    }
}

impl Deref for QuestionSet {
    type Target = [Mcq];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Mcq>> for QuestionSet {
    fn from(questions: Vec<Mcq>) -> Self {
        Self::new(questions)
    }
}
