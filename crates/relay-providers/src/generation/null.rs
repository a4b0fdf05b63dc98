//! Null generation provider for testing and development
//!
//! Answers every request with a fixed reply. No network access - always
//! works offline, which makes it useful as the last entry of a local chain.

use async_trait::async_trait;

use relay_domain::{GenerationRequest, ProviderError, TextGenerationProvider};

use crate::constants::NULL_PROVIDER_REPLY;

/// Null generation provider
///
/// # Example
///
/// ```rust
/// use relay_providers::generation::NullGenerationProvider;
/// use relay_domain::TextGenerationProvider;
///
/// let provider = NullGenerationProvider::new();
/// assert_eq!(provider.provider_name(), "null");
/// ```
pub struct NullGenerationProvider {
    reply: String,
}

impl NullGenerationProvider {
    /// Create a new null provider with the default reply
    pub fn new() -> Self {
        Self::with_reply(NULL_PROVIDER_REPLY)
    }

    /// Create a null provider that answers with `reply`
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for NullGenerationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationProvider for NullGenerationProvider {
    async fn invoke(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
