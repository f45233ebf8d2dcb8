use std::sync::Arc;

use storage::repository::Storage;
use tutor_core::model::QuestionSet;
use tutor_core::{Clock, SessionState};

use crate::config::TutorConfig;
use crate::error::AppServicesError;
use crate::tutor_loop::TutorLoopService;
use crate::tutor_service::TutorService;

/// Assembles app-facing services and loads the question set once.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    questions: QuestionSet,
    tutor: Arc<TutorService>,
    tutor_loop: Arc<TutorLoopService>,
}

impl AppServices {
    /// Load the questions from `storage` and build the tutor from `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the questions cannot be loaded or the set
    /// is empty.
    pub async fn new(
        storage: &Storage,
        config: &TutorConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let tutor = Arc::new(TutorService::from_config(config));
        Self::with_tutor(storage, tutor, config.history_limit, clock).await
    }

    /// Same as `new`, with a ready-made tutor (e.g. a custom backend).
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the questions cannot be loaded or the set
    /// is empty.
    pub async fn with_tutor(
        storage: &Storage,
        tutor: Arc<TutorService>,
        history_limit: usize,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let questions = storage.questions.load_questions().await?;
        if questions.is_empty() {
            return Err(AppServicesError::EmptyQuestionSet);
        }
        tracing::info!(questions = questions.len(), "question set loaded");

        let tutor_loop = Arc::new(TutorLoopService::new(Arc::clone(&tutor), history_limit));

        Ok(Self {
            clock,
            questions,
            tutor,
            tutor_loop,
        })
    }

    /// A fresh, logged-out session over the loaded questions.
    #[must_use]
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.questions.clone()).with_clock(self.clock)
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn tutor(&self) -> Arc<TutorService> {
        Arc::clone(&self.tutor)
    }

    #[must_use]
    pub fn tutor_loop(&self) -> Arc<TutorLoopService> {
        Arc::clone(&self.tutor_loop)
    }
}
