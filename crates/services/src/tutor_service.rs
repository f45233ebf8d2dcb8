use std::sync::Arc;

use tutor_core::model::ChatTurn;

use crate::ai::{CompletionBackend, CompletionRequest, HttpCompletionBackend};
use crate::config::TutorConfig;
use crate::error::TutorError;
use crate::prompt::{ExplanationRequest, build_explanation_prompt, system_message};

pub const TEMPERATURE: f32 = 0.7;
pub const EXPLANATION_MAX_TOKENS: u32 = 1000;
pub const CHAT_MAX_TOKENS: u32 = 800;

/// Stateless explanation and chat client.
///
/// Every call is a single request/response round trip; nothing is cached or
/// retried. Failures are logged and collapsed into an opaque `TutorError`.
#[derive(Clone)]
pub struct TutorService {
    backend: Arc<dyn CompletionBackend>,
    system_prompt: String,
}

impl TutorService {
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>, system_prompt: impl Into<String>) -> Self {
        Self {
            backend,
            system_prompt: system_prompt.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &TutorConfig) -> Self {
        Self::new(
            Arc::new(HttpCompletionBackend::new(config.api.clone())),
            config.system_prompt.clone(),
        )
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.backend.enabled()
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Ask for a worked explanation of a question.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Explanation` for any backend failure.
    pub async fn get_explanation(
        &self,
        request: &ExplanationRequest,
    ) -> Result<String, TutorError> {
        let completion = CompletionRequest {
            messages: vec![
                ChatTurn::system(self.system_prompt.clone()),
                ChatTurn::user(build_explanation_prompt(request)),
            ],
            temperature: TEMPERATURE,
            max_tokens: EXPLANATION_MAX_TOKENS,
        };

        self.backend.complete(completion).await.map_err(|err| {
            tracing::error!(error = %err, "explanation request failed");
            TutorError::Explanation
        })
    }

    /// Continue a conversation. `turns` is sent as given, after the system
    /// message; trimming history is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::ChatResponse` for any backend failure.
    pub async fn get_chat_response(
        &self,
        turns: &[ChatTurn],
        context: Option<&str>,
    ) -> Result<String, TutorError> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(ChatTurn::system(system_message(&self.system_prompt, context)));
        messages.extend_from_slice(turns);

        let completion = CompletionRequest {
            messages,
            temperature: TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
        };

        self.backend.complete(completion).await.map_err(|err| {
            tracing::error!(error = %err, turns = turns.len(), "chat request failed");
            TutorError::ChatResponse
        })
    }
}
