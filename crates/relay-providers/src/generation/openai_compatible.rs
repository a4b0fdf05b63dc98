//! OpenAI-Compatible Generation Provider
//!
//! Implements the TextGenerationProvider port for any backend exposing the
//! OpenAI chat completions wire format (Groq, SambaNova, OpenRouter).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use relay_domain::{GenerationRequest, ProviderError, TextGenerationProvider};

use crate::constants::CONTENT_TYPE_JSON;
use crate::generation::helpers::{AdapterSettings, chat_messages};
use crate::utils::HttpResponseUtils;

/// JSON pointer of the completion text
const COMPLETION_POINTER: &str = "/choices/0/message/content";

/// OpenAI-compatible chat completions provider
///
/// Receives HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use relay_providers::generation::{AdapterSettings, OpenAICompatibleProvider};
/// use relay_providers::constants::GROQ_ENDPOINT;
/// use reqwest::Client;
///
/// let settings = AdapterSettings::new("Groq", GROQ_ENDPOINT, "llama-3.1-70b-versatile")
///     .with_api_key("GROQ_API_KEY", std::env::var("GROQ_API_KEY").ok());
/// let provider = OpenAICompatibleProvider::new(settings, Client::new());
/// ```
pub struct OpenAICompatibleProvider {
    settings: AdapterSettings,
    http_client: Client,
}

impl OpenAICompatibleProvider {
    /// Create a new OpenAI-compatible provider
    pub fn new(settings: AdapterSettings, http_client: Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    fn payload(&self, request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "messages": chat_messages(request),
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerationProvider for OpenAICompatibleProvider {
    async fn invoke(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.settings.require_api_key()?;
        let label = self.settings.label.as_str();

        let mut builder = self
            .http_client
            .post(self.settings.resolved_endpoint())
            .bearer_auth(api_key)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.settings.timeout)
            .json(&self.payload(request));
        for (name, value) in &self.settings.extra_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpResponseUtils::map_send_error(&e, self.settings.timeout, label))?;

        let body = HttpResponseUtils::check_and_parse(response, label).await?;
        debug!(provider = label, model = %self.settings.model, "Chat completion received");
        HttpResponseUtils::completion_text(&body, COMPLETION_POINTER, label)
    }

    fn provider_name(&self) -> &str {
        "openai_compatible"
    }
}
