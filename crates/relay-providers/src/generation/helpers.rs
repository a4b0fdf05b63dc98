//! Common helpers for generation providers
//!
//! Shared functionality and patterns used across the generation adapters to
//! keep prompting semantics identical regardless of which backend serves a
//! request.

use std::collections::BTreeMap;
use std::time::Duration;

use relay_domain::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
use relay_domain::{ChatRole, GenerationRequest, ProviderError};
use serde_json::{Value, json};

use crate::constants::MODEL_PLACEHOLDER;

/// Connection parameters shared by every HTTP adapter
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// Label used in diagnostics (usually the display name)
    pub label: String,
    /// Full endpoint URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Resolved API key, if the credential was available
    pub api_key: Option<String>,
    /// Name of the credential, reported when it is missing
    pub credential_name: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token budget
    pub max_tokens: u32,
    /// Per-request timeout passed to reqwest
    pub timeout: Duration,
    /// Additional request headers (e.g. OpenRouter `HTTP-Referer`)
    pub extra_headers: BTreeMap<String, String>,
}

impl AdapterSettings {
    /// Create settings with default sampling parameters
    pub fn new(
        label: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            endpoint: constructor::validate_url(endpoint.into()),
            model: model.into(),
            api_key: None,
            credential_name: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            extra_headers: BTreeMap::new(),
        }
    }

    /// Set the API key and the credential name it came from
    pub fn with_api_key(mut self, credential_name: impl Into<String>, api_key: Option<String>) -> Self {
        self.credential_name = credential_name.into();
        self.api_key = constructor::validate_api_key(api_key);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set sampling parameters
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Add an extra request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Endpoint with `{model}` replaced by the configured model
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint.replace(MODEL_PLACEHOLDER, &self.model)
    }

    /// The API key, or an `Unauthenticated` error naming the missing credential
    pub fn require_api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Unauthenticated(format!("{} not configured", self.credential_name))
        })
    }
}

/// Common constructor patterns used by generation providers
pub mod constructor {
    /// Normalize an API key, treating blank values as absent
    pub fn validate_api_key(api_key: Option<String>) -> Option<String> {
        api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Normalize an endpoint URL
    pub fn validate_url(url: String) -> String {
        url.trim().to_string()
    }
}

/// Build OpenAI-style `{role, content}` messages
///
/// Ordering is fixed for every adapter: system context first (omitted when
/// empty), then history oldest-first, then the new prompt.
pub fn chat_messages(request: &GenerationRequest) -> Vec<Value> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);

    if !request.system_context.trim().is_empty() {
        messages.push(json!({
            "role": ChatRole::System.as_str(),
            "content": request.system_context,
        }));
    }

    messages.extend(request.history.iter().map(|m| {
        json!({
            "role": m.role.as_str(),
            "content": m.content,
        })
    }));

    messages.push(json!({
        "role": ChatRole::User.as_str(),
        "content": request.prompt,
    }));

    messages
}
