//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Failures of a single chat-completion call.
///
/// These carry the real cause and are only ever logged; callers of
/// `TutorService` see a `TutorError` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionError {
    #[error("AI features are not configured")]
    Disabled,
    #[error("completion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("malformed completion envelope: {0}")]
    MalformedEnvelope(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Opaque failures surfaced to the front-end.
///
/// Messages are fixed; the underlying cause never appears in them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TutorError {
    #[error("failed to get explanation")]
    Explanation,
    #[error("failed to get chat response")]
    ChatResponse,
    #[error("no question is available")]
    NoQuestion,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("the question set is empty")]
    EmptyQuestionSet,
}
