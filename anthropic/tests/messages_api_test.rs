//! Wire-level tests for the Messages API client against a mock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use serde_json::json;
use symposium_anthropic::{AnthropicClient, ClaudeError, MessagesRequest, types::Message};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnthropicClient {
    AnthropicClient::new("test-key".to_string()).with_api_url(format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn test_messages_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "system": "be brief",
            "messages": [{"role": "user", "content": [{"type": "text", "text": "Hello There"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "model": "claude-sonnet-4-5-20250929",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hi! - [Register](suggestion:Register for an Event)"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 9}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = MessagesRequest::new(vec![Message::user("Hello There")])
        .with_system("be brief".to_string());
    let response = client_for(&server).messages(request).await.expect("request succeeds");

    assert_eq!(response.id, "msg_01");
    assert!(response.text().contains("suggestion:Register for an Event"));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .messages(MessagesRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ClaudeError::RateLimited));
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .messages(MessagesRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ClaudeError::Unauthorized));
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .messages(MessagesRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();

    match err {
        ClaudeError::ApiError { status, message } => {
            assert_eq!(status, 529);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .messages(MessagesRequest::new(vec![Message::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ClaudeError::ResponseParseFailed(_)));
}
