mod http;

use async_trait::async_trait;
use tutor_core::model::ChatTurn;

use crate::error::CompletionError;

pub use http::{HttpCompletionBackend, extract_content};

/// One chat-completion call: full message list plus sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Something that can turn a message list into generated text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Perform a single, non-streaming completion.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError` for transport failures, non-success statuses,
    /// malformed envelopes, or when the backend is not configured.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    fn enabled(&self) -> bool {
        true
    }
}
