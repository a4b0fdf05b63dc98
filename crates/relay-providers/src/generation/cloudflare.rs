//! Cloudflare Workers AI Generation Provider
//!
//! Implements the TextGenerationProvider port using the Workers AI `run`
//! endpoint. The endpoint is account scoped, so a missing account id is
//! treated like a missing credential.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use relay_domain::{GenerationRequest, ProviderError, TextGenerationProvider};

use crate::constants::{CLOUDFLARE_ACCOUNT_PLACEHOLDER, CONTENT_TYPE_JSON};
use crate::generation::helpers::{AdapterSettings, chat_messages, constructor};
use crate::utils::HttpResponseUtils;

/// JSON pointer of the completion text
const COMPLETION_POINTER: &str = "/result/response";

/// Cloudflare Workers AI provider
pub struct CloudflareProvider {
    settings: AdapterSettings,
    account_id: Option<String>,
    http_client: Client,
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Arguments
    /// * `settings` - Shared adapter settings; `endpoint` may contain `{account_id}`
    /// * `account_id` - Cloudflare account id substituted into the endpoint
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(settings: AdapterSettings, account_id: Option<String>, http_client: Client) -> Self {
        Self {
            settings,
            account_id: constructor::validate_api_key(account_id),
            http_client,
        }
    }

    /// Endpoint with the model and account id substituted
    fn resolved_endpoint(&self) -> Result<String, ProviderError> {
        let endpoint = self.settings.resolved_endpoint();
        if !endpoint.contains(CLOUDFLARE_ACCOUNT_PLACEHOLDER) {
            return Ok(endpoint);
        }
        let account_id = self.account_id.as_deref().ok_or_else(|| {
            ProviderError::Unauthenticated("Cloudflare account id not configured".to_string())
        })?;
        Ok(endpoint.replace(CLOUDFLARE_ACCOUNT_PLACEHOLDER, account_id))
    }
}

#[async_trait]
impl TextGenerationProvider for CloudflareProvider {
    async fn invoke(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.settings.require_api_key()?;
        let endpoint = self.resolved_endpoint()?;
        let label = self.settings.label.as_str();

        let response = self
            .http_client
            .post(endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.settings.timeout)
            .json(&serde_json::json!({ "messages": chat_messages(request) }))
            .send()
            .await
            .map_err(|e| HttpResponseUtils::map_send_error(&e, self.settings.timeout, label))?;

        let body = HttpResponseUtils::check_and_parse(response, label).await?;
        debug!(provider = label, model = %self.settings.model, "Workers AI result received");
        HttpResponseUtils::completion_text(&body, COMPLETION_POINTER, label)
    }

    fn provider_name(&self) -> &str {
        "cloudflare"
    }
}
