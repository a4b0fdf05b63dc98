//! Tests for the OpenAI-compatible adapter against a mock HTTP server

use mockito::{Matcher, Server};
use relay_domain::{ChatMessage, GenerationRequest, ProviderErrorKind, TextGenerationProvider};
use relay_providers::generation::{AdapterSettings, OpenAICompatibleProvider};
use reqwest::Client;
use serde_json::json;

const PATH: &str = "/openai/v1/chat/completions";

fn provider(base_url: &str, api_key: Option<&str>) -> OpenAICompatibleProvider {
    let settings = AdapterSettings::new("Groq", format!("{base_url}{PATH}"), "llama-test")
        .with_api_key("GROQ_API_KEY", api_key.map(str::to_string));
    OpenAICompatibleProvider::new(settings, Client::new())
}

/// Test that messages go out in system, history, prompt order
#[tokio::test]
async fn test_sends_ordered_messages_and_returns_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama-test",
            "max_tokens": 1024,
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello"},
                {"role": "user", "content": "Capital of France?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Paris"}}]}"#)
        .create_async()
        .await;

    let request = GenerationRequest::new("Capital of France?")
        .with_system_context("You are terse.")
        .with_history(vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello")]);
    let text = provider(&server.url(), Some("test-key"))
        .invoke(&request)
        .await
        .expect("completion");

    assert_eq!(text, "Paris");
    mock.assert_async().await;
}

/// Test that configured extra headers reach the wire
#[tokio::test]
async fn test_extra_headers_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("http-referer", "https://relay.local")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
        .create_async()
        .await;

    let settings = AdapterSettings::new("OpenRouter", format!("{}{PATH}", server.url()), "m")
        .with_api_key("OPENROUTER_API_KEY", Some("k".into()))
        .with_header("HTTP-Referer", "https://relay.local");
    let provider = OpenAICompatibleProvider::new(settings, Client::new());

    assert_eq!(provider.invoke(&GenerationRequest::new("x")).await.unwrap(), "ok");
    mock.assert_async().await;
}

/// Test that error statuses map to the most specific kind
#[tokio::test]
async fn test_status_codes_are_classified() {
    let cases = [
        (401, r#"{"error":"invalid key"}"#, ProviderErrorKind::Unauthenticated),
        (429, r#"{"error":"slow down"}"#, ProviderErrorKind::RateLimited),
        (500, "internal", ProviderErrorKind::Unknown),
    ];

    for (status, body, expected) in cases {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let err = provider(&server.url(), Some("k"))
            .invoke(&GenerationRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), expected, "status {status}");
    }
}

/// Test that a body without completion text is malformed
#[tokio::test]
async fn test_missing_content_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = provider(&server.url(), Some("k"))
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::MalformedResponse);
}

/// Test that a missing key fails before any request is sent
#[tokio::test]
async fn test_missing_key_fails_without_network() {
    let err = provider("http://127.0.0.1:1", None)
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::Unauthenticated);
    assert!(err.to_string().contains("GROQ_API_KEY"));
}

/// Test that a refused connection is reported as unreachable
#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let err = provider("http://127.0.0.1:1", Some("k"))
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::Unreachable);
}
