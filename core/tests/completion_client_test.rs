//! Integration tests for the HTTP completion client
//!
//! Runs against a local mock server; no real endpoint is contacted.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellness_companion_core::ai::{ChatMessage, CompletionClient, HttpCompletionClient};
use wellness_companion_core::error::CompletionError;

fn client_for(server: &MockServer) -> HttpCompletionClient {
    HttpCompletionClient::new(format!("{}/text/llm/", server.uri())).unwrap()
}

#[tokio::test]
async fn test_complete_posts_messages_and_returns_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text/llm/"))
        .and(body_json(json!({
            "messages": [
                { "role": "system", "content": "You are a coach." },
                { "role": "user", "content": "Motivate me." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completion": "You have got this!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = [
        ChatMessage::system("You are a coach."),
        ChatMessage::user("Motivate me."),
    ];

    let completion = client.complete(&messages).await.unwrap();

    assert_eq!(completion, "You have got this!");
}

#[tokio::test]
async fn test_complete_surfaces_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::Malformed(_)));
}

#[tokio::test]
async fn test_complete_rejects_missing_completion_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "hi" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::Malformed(_)));
}
