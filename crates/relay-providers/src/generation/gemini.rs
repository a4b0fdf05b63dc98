//! Gemini Generation Provider
//!
//! Implements the TextGenerationProvider port using Google's Gemini
//! `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use relay_domain::{ChatRole, GenerationRequest, ProviderError, TextGenerationProvider};

use crate::constants::{CONTENT_TYPE_JSON, GEMINI_API_KEY_HEADER, GEMINI_CONTEXT_ACK};
use crate::generation::helpers::AdapterSettings;
use crate::utils::HttpResponseUtils;

/// JSON pointer of the completion text
const COMPLETION_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Gemini generation provider
///
/// Gemini has no system role in `contents`, so the system context travels as
/// a leading user turn followed by a fixed model acknowledgement. History
/// roles other than `user` are sent as `model`.
pub struct GeminiProvider {
    settings: AdapterSettings,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(settings: AdapterSettings, http_client: Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    fn turn(role: &str, text: &str) -> Value {
        json!({ "role": role, "parts": [{ "text": text }] })
    }

    /// Build the `contents` array in system, history, prompt order
    fn contents(request: &GenerationRequest) -> Vec<Value> {
        let mut contents = Vec::with_capacity(request.history.len() + 3);

        if !request.system_context.trim().is_empty() {
            contents.push(Self::turn("user", &request.system_context));
            contents.push(Self::turn("model", GEMINI_CONTEXT_ACK));
        }

        contents.extend(request.history.iter().map(|m| {
            let role = if m.role == ChatRole::User { "user" } else { "model" };
            Self::turn(role, &m.content)
        }));

        contents.push(Self::turn("user", &request.prompt));
        contents
    }

    fn payload(&self, request: &GenerationRequest) -> Value {
        json!({
            "contents": Self::contents(request),
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.settings.max_tokens,
            }
        })
    }
}

#[async_trait]
impl TextGenerationProvider for GeminiProvider {
    async fn invoke(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.settings.require_api_key()?;
        let label = self.settings.label.as_str();

        let response = self
            .http_client
            .post(self.settings.resolved_endpoint())
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header(GEMINI_API_KEY_HEADER, api_key)
            .timeout(self.settings.timeout)
            .json(&self.payload(request))
            .send()
            .await
            .map_err(|e| HttpResponseUtils::map_send_error(&e, self.settings.timeout, label))?;

        let body = HttpResponseUtils::check_and_parse(response, label).await?;
        debug!(provider = label, model = %self.settings.model, "Gemini content generated");
        HttpResponseUtils::completion_text(&body, COMPLETION_POINTER, label)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
