use std::sync::Arc;

use serde_json::json;
use services::{ApiConfig, ExplanationRequest, HttpCompletionBackend, TutorError, TutorService};
use tutor_core::model::{AnswerOption, ChatTurn};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn tutor_for(server: &MockServer) -> TutorService {
    let config = ApiConfig {
        api_url: format!("{}{COMPLETIONS_PATH}", server.uri()),
        api_key: "sk-test".into(),
        model: "gpt-3.5-turbo".into(),
    };
    TutorService::new(
        Arc::new(HttpCompletionBackend::new(Some(config))),
        "You tutor NP students.",
    )
}

fn request() -> ExplanationRequest {
    ExplanationRequest {
        question: "First-line agent?".into(),
        options: vec![
            AnswerOption::new("A", "Clonidine"),
            AnswerOption::new("B", "Chlorthalidone"),
        ],
        correct_answer: AnswerOption::new("B", "Chlorthalidone"),
        selected_answer: None,
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn explanation_posts_expected_body_and_returns_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.7,
            "max_tokens": 1000,
            "messages": [{ "role": "system", "content": "You tutor NP students." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Because thiazides.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = tutor_for(&server).get_explanation(&request()).await.unwrap();
    assert_eq!(text, "Because thiazides.");
}

#[tokio::test]
async fn chat_uses_smaller_token_cap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({
            "max_tokens": 800,
            "messages": [
                { "role": "system", "content": "You tutor NP students.\n\nCurrent context: HTN" },
                { "role": "user", "content": "why not clonidine?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Rebound hypertension.")))
        .expect(1)
        .mount(&server)
        .await;

    let text = tutor_for(&server)
        .get_chat_response(&[ChatTurn::user("why not clonidine?")], Some("HTN"))
        .await
        .unwrap();
    assert_eq!(text, "Rebound hypertension.");
}

#[tokio::test]
async fn non_success_status_is_opaque() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("upstream exploded: invalid key sk-test"),
        )
        .mount(&server)
        .await;

    let tutor = tutor_for(&server);

    let err = tutor.get_explanation(&request()).await.unwrap_err();
    assert_eq!(err, TutorError::Explanation);
    let message = err.to_string();
    assert_eq!(message, "failed to get explanation");
    assert!(!message.contains("500"));
    assert!(!message.contains("exploded"));

    let err = tutor
        .get_chat_response(&[ChatTurn::user("hi")], None)
        .await
        .unwrap_err();
    assert_eq!(err, TutorError::ChatResponse);
    assert_eq!(err.to_string(), "failed to get chat response");
}

#[tokio::test]
async fn malformed_envelope_is_opaque() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = tutor_for(&server).get_explanation(&request()).await.unwrap_err();
    assert_eq!(err, TutorError::Explanation);
}

#[tokio::test]
async fn unreachable_endpoint_is_opaque() {
    let server = MockServer::start().await;
    let tutor = tutor_for(&server);
    drop(server);

    let err = tutor
        .get_chat_response(&[ChatTurn::user("hi")], None)
        .await
        .unwrap_err();
    assert_eq!(err, TutorError::ChatResponse);
}
