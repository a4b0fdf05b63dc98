//! Adapter chain factory
//!
//! Turns the configured provider list into registered adapters. Credentials
//! are looked up by environment variable name; a missing credential still
//! yields an adapter, which fails with `Unauthenticated` when invoked.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use relay_domain::TextGenerationProvider;
use relay_domain::error::Result;
use relay_providers::generation::{
    AdapterSettings, CloudflareProvider, GeminiProvider, NullGenerationProvider,
    OpenAICompatibleProvider,
};
use relay_providers::http::HttpClientConfig;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{AppConfig, ProviderConfig, ProviderKind};
use crate::error_ext::ErrorContext;
use crate::routing::{MetricsFacadeCollector, Router, RouterConfig};

/// Resolves a credential name to its value
pub type CredentialLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builds adapters and routers from configuration
#[derive(Clone)]
pub struct ProviderFactory {
    http_client: Client,
    request_timeout: Duration,
    lookup: CredentialLookup,
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFactory")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl ProviderFactory {
    /// Factory reading credentials from the process environment
    pub fn new(http_client: Client, request_timeout: Duration) -> Self {
        Self {
            http_client,
            request_timeout,
            lookup: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the credential source
    pub fn with_credential_lookup(mut self, lookup: CredentialLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Build one adapter
    pub fn create_adapter(&self, config: &ProviderConfig) -> Arc<dyn TextGenerationProvider> {
        if config.kind == ProviderKind::Null {
            return Arc::new(NullGenerationProvider::new());
        }

        let credential_name = config.api_key_env.clone().unwrap_or_default();
        let api_key = config.api_key_env.as_deref().and_then(|env| (self.lookup)(env));
        if api_key.is_none() {
            warn!(provider = %config.name, credential = %credential_name, "Credential not set, provider will fail until configured");
        }

        let mut settings =
            AdapterSettings::new(&config.display_name, &config.endpoint, &config.model)
                .with_api_key(credential_name, api_key)
                .with_timeout(self.request_timeout)
                .with_sampling(config.temperature, config.max_tokens);
        for (name, value) in &config.extra_headers {
            settings = settings.with_header(name, value);
        }

        let client = self.http_client.clone();
        debug!(provider = %config.name, kind = %config.kind, "Creating adapter");
        match config.kind {
            ProviderKind::OpenaiCompatible => {
                Arc::new(OpenAICompatibleProvider::new(settings, client))
            }
            ProviderKind::Gemini => Arc::new(GeminiProvider::new(settings, client)),
            ProviderKind::Cloudflare => {
                let account_id = config
                    .account_id_env
                    .as_deref()
                    .and_then(|env| (self.lookup)(env));
                Arc::new(CloudflareProvider::new(settings, account_id, client))
            }
            ProviderKind::Null => Arc::new(NullGenerationProvider::new()),
        }
    }

    /// Build a router for the whole configured chain
    pub fn create_router(&self, config: &AppConfig) -> Result<Router> {
        config
            .providers
            .iter()
            .fold(
                Router::builder(RouterConfig::from(&config.routing))
                    .with_metrics(Arc::new(MetricsFacadeCollector::new())),
                |builder, provider| {
                    builder.register(provider.descriptor(), self.create_adapter(provider))
                },
            )
            .build()
    }
}

/// Build a router from configuration with a pooled HTTP client
pub fn build_router(config: &AppConfig) -> Result<Router> {
    let timeout = config.routing.request_timeout();
    let client = HttpClientConfig::with_timeout(timeout)
        .build_client()
        .context("Failed to build HTTP client")?;
    ProviderFactory::new(client, timeout).create_router(config)
}
