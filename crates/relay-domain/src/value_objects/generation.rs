//! Generation request and result types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Author of a message in the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// End user turn
    User,
    /// Model turn
    Assistant,
    /// System instruction
    System,
}

impl ChatRole {
    /// Wire name used by OpenAI-compatible APIs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// A single role-tagged message of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an explicit role
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Input to a routed generation
///
/// History is ordered oldest-first and is expected to be truncated by the
/// caller; the router does not cap its length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The new user prompt
    pub prompt: String,
    /// Trailing conversation history, most recent last
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// System/context text injected ahead of the conversation
    #[serde(default)]
    pub system_context: String,
}

impl GenerationRequest {
    /// Create a request with an empty history and no system context
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set the conversation history
    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    /// Set the system context
    pub fn with_system_context(mut self, context: impl Into<String>) -> Self {
        self.system_context = context.into();
        self
    }

    /// Reject requests that must never reach a provider
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::invalid_argument("prompt must not be empty"));
        }
        Ok(())
    }
}

/// Output of a successful routed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Generated text, exactly as returned by the provider
    pub response: String,
    /// Unique name of the provider that served the request
    pub provider: String,
    /// Wall-clock latency of the successful call in milliseconds
    pub latency_ms: u64,
}
