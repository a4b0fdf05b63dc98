//! Provider chain configuration types
//!
//! Each entry describes one backend. Credentials are referenced by
//! environment variable name and resolved when the chain is built.

use std::collections::BTreeMap;

use relay_domain::ProviderDescriptor;
use relay_domain::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use relay_providers::constants::{
    CLOUDFLARE_ENDPOINT, GEMINI_ENDPOINT, GROQ_ENDPOINT, OPENROUTER_ENDPOINT, SAMBANOVA_ENDPOINT,
};
use serde::{Deserialize, Serialize};

/// Wire protocol spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat completions format
    OpenaiCompatible,
    /// Google Gemini `generateContent`
    Gemini,
    /// Cloudflare Workers AI
    Cloudflare,
    /// Offline canned replies
    Null,
}

impl ProviderKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenaiCompatible => "openai_compatible",
            Self::Gemini => "gemini",
            Self::Cloudflare => "cloudflare",
            Self::Null => "null",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one provider in the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique provider name
    pub name: String,
    /// Human readable name shown in stats
    pub display_name: String,
    /// Selection rank, lower first
    pub priority: u32,
    /// Adapter wire protocol
    pub kind: ProviderKind,
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Endpoint URL
    #[serde(default)]
    pub endpoint: String,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Environment variable holding the account id (Cloudflare)
    #[serde(default)]
    pub account_id_env: Option<String>,
    /// Additional request headers
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ProviderConfig {
    /// Create a provider entry with default sampling parameters
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        priority: u32,
        kind: ProviderKind,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            priority,
            kind,
            model: String::new(),
            endpoint: String::new(),
            api_key_env: None,
            account_id_env: None,
            extra_headers: BTreeMap::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the model and endpoint
    pub fn with_target(mut self, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        self.model = model.into();
        self.endpoint = endpoint.into();
        self
    }

    /// Set the API key environment variable
    pub fn with_api_key_env(mut self, env: impl Into<String>) -> Self {
        self.api_key_env = Some(env.into());
        self
    }

    /// Set the account id environment variable
    pub fn with_account_id_env(mut self, env: impl Into<String>) -> Self {
        self.account_id_env = Some(env.into());
        self
    }

    /// Add an extra request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Static descriptor registered with the router
    pub fn descriptor(&self) -> ProviderDescriptor {
        let mut descriptor = ProviderDescriptor::new(&self.name, &self.display_name, self.priority)
            .with_model(&self.model)
            .with_endpoint(&self.endpoint);
        if let Some(env) = &self.api_key_env {
            descriptor = descriptor.with_credential_ref(env);
        }
        descriptor
    }
}

/// The five-provider chain used when no configuration overrides it
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("groq", "Groq", 1, ProviderKind::OpenaiCompatible)
            .with_target("llama-3.1-70b-versatile", GROQ_ENDPOINT)
            .with_api_key_env("GROQ_API_KEY"),
        ProviderConfig::new("gemini", "Gemini 2.0", 2, ProviderKind::Gemini)
            .with_target("gemini-2.0-flash-exp", GEMINI_ENDPOINT)
            .with_api_key_env("GEMINI_API_KEY"),
        ProviderConfig::new("sambanova", "SambaNova", 3, ProviderKind::OpenaiCompatible)
            .with_target("Meta-Llama-3.1-70B-Instruct", SAMBANOVA_ENDPOINT)
            .with_api_key_env("SAMBANOVA_API_KEY"),
        ProviderConfig::new("cloudflare", "Cloudflare", 4, ProviderKind::Cloudflare)
            .with_target("@cf/meta/llama-3.1-8b-instruct", CLOUDFLARE_ENDPOINT)
            .with_api_key_env("CLOUDFLARE_API_KEY")
            .with_account_id_env("CLOUDFLARE_ACCOUNT_ID"),
        ProviderConfig::new("openrouter", "OpenRouter", 5, ProviderKind::OpenaiCompatible)
            .with_target("meta-llama/llama-3.1-70b-instruct:free", OPENROUTER_ENDPOINT)
            .with_api_key_env("OPENROUTER_API_KEY")
            .with_header("HTTP-Referer", "https://github.com/relay-rs/relay"),
    ]
}
