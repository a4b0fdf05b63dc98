use async_trait::async_trait;

use crate::error::ProviderError;
use crate::value_objects::GenerationRequest;

/// Text Generation Interface
///
/// One implementation per backend service. An adapter translates the
/// generic `(prompt, system context, history)` triple into the backend's
/// wire format, performs exactly one network call, and maps the answer
/// back to plain text.
///
/// Adapters are stateless with respect to routing: they never retry,
/// never post-process the generated text, and report failures with the
/// most specific [`ProviderError`] variant available. Retry and failover
/// belong to the router.
///
/// # Example
///
/// ```ignore
/// use relay_domain::{GenerationRequest, TextGenerationProvider};
///
/// let provider: Arc<dyn TextGenerationProvider> = factory.build(&config)?;
/// let request = GenerationRequest::new("What programs do you offer?")
///     .with_system_context("You are a helpful assistant.");
/// let text = provider.invoke(&request).await?;
/// ```
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Generate a completion for the request
    async fn invoke(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Identifier of the backend implementation (e.g. "openai_compatible", "gemini")
    fn provider_name(&self) -> &str;
}
