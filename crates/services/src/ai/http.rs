use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tutor_core::model::ChatTurn;

use super::{CompletionBackend, CompletionRequest};
use crate::config::ApiConfig;
use crate::error::CompletionError;

/// OpenAI-compatible chat-completion client.
#[derive(Clone)]
pub struct HttpCompletionBackend {
    client: Client,
    config: Option<ApiConfig>,
}

impl HttpCompletionBackend {
    #[must_use]
    pub fn new(config: Option<ApiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let config = self.config.as_ref().ok_or(CompletionError::Disabled)?;

        let payload = ChatRequest {
            model: &config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&config.api_url)
            .bearer_auth(&config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CompletionError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        extract_content(&body)
    }

    fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

/// Pull `choices[0].message.content` out of a response body.
///
/// # Errors
///
/// Returns `CompletionError::MalformedEnvelope` if the body does not match the
/// expected shape, has no choices, or the first choice has no content.
pub fn extract_content(body: &str) -> Result<String, CompletionError> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedEnvelope(e.to_string()))?;

    let choice = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedEnvelope("no choices".into()))?;

    choice
        .message
        .content
        .ok_or_else(|| CompletionError::MalformedEnvelope("first choice has no content".into()))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
