//! Tests for the Gemini adapter against a mock HTTP server

use mockito::{Matcher, Server};
use relay_domain::{ChatMessage, GenerationRequest, ProviderErrorKind, TextGenerationProvider};
use relay_providers::constants::GEMINI_CONTEXT_ACK;
use relay_providers::generation::{AdapterSettings, GeminiProvider};
use reqwest::Client;
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-test:generateContent";

const PATH_TEMPLATE: &str = "/v1beta/models/{model}:generateContent";

fn provider(base_url: &str) -> GeminiProvider {
    let settings = AdapterSettings::new(
        "Gemini",
        format!("{base_url}{PATH_TEMPLATE}"),
        "gemini-test",
    )
    .with_api_key("GEMINI_API_KEY", Some("g-key".into()))
    .with_sampling(0.5, 256);
    GeminiProvider::new(settings, Client::new())
}

/// Test that the context becomes a user turn plus the model acknowledgement
#[tokio::test]
async fn test_sends_contents_with_context_turns() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "g-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Be brief."}]},
                {"role": "model", "parts": [{"text": GEMINI_CONTEXT_ACK}]},
                {"role": "user", "parts": [{"text": "Hi"}]},
                {"role": "model", "parts": [{"text": "Hello"}]},
                {"role": "user", "parts": [{"text": "Why is the sky blue?"}]}
            ],
            "generationConfig": {"maxOutputTokens": 256}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Rayleigh scattering."}]}}]}"#)
        .create_async()
        .await;

    let request = GenerationRequest::new("Why is the sky blue?")
        .with_system_context("Be brief.")
        .with_history(vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello")]);
    let text = provider(&server.url()).invoke(&request).await.unwrap();

    assert_eq!(text, "Rayleigh scattering.");
    mock.assert_async().await;
}

/// Test that RESOURCE_EXHAUSTED is reported as rate limited
#[tokio::test]
async fn test_resource_exhausted_is_rate_limited() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body(r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#)
        .create_async()
        .await;

    let err = provider(&server.url())
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::RateLimited);
}

/// Test that a non-JSON body is malformed
#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = provider(&server.url())
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ProviderErrorKind::MalformedResponse);
}

/// Test that the configured model selects the request path
#[tokio::test]
async fn test_configured_model_is_used_in_path() {
    let mut server = Server::new_async().await;
    let pro = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"pro"}]}}]}"#)
        .create_async()
        .await;
    let flash = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash-exp:generateContent")
        .expect(0)
        .create_async()
        .await;

    let settings = AdapterSettings::new(
        "Gemini",
        format!("{}{PATH_TEMPLATE}", server.url()),
        "gemini-1.5-pro",
    )
    .with_api_key("GEMINI_API_KEY", Some("g-key".into()));
    let text = GeminiProvider::new(settings, Client::new())
        .invoke(&GenerationRequest::new("x"))
        .await
        .unwrap();

    assert_eq!(text, "pro");
    pro.assert_async().await;
    flash.assert_async().await;
}
