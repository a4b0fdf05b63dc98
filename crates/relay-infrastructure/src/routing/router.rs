//! Priority router with failover and circuit breaking
//!
//! The router owns the frozen provider registry and one [`ProviderHealth`]
//! per provider. A call walks the eligible providers in priority order and
//! returns the first success. Health entries are only locked for the short
//! bookkeeping steps, never across an adapter call.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use relay_domain::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_FAILURE_THRESHOLD, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use relay_domain::error::{Error, ProviderError, ProviderFailure, Result};
use relay_domain::{
    GenerationRequest, GenerationResult, ProviderDescriptor, ProviderStats, RouterStats,
    TextGenerationProvider,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::routing::health::{BreakerPolicy, CircuitState, ProviderHealth};
use crate::routing::metrics::{CallOutcome, NullMetricsCollector, RoutingMetricsCollector};

/// Sentinel stored in `last_used` before the first success
const NO_PROVIDER: usize = usize::MAX;

/// Router tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Consecutive failures that trip a provider
    pub failure_threshold: u32,
    /// Time a tripped provider stays out of rotation
    pub cooldown: Duration,
    /// Upper bound on one adapter invocation
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl From<&RoutingConfig> for RouterConfig {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold,
            cooldown: config.cooldown(),
            request_timeout: config.request_timeout(),
        }
    }
}

impl RouterConfig {
    /// Set the failure threshold
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Set the cooldown
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the per-call timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn policy(&self) -> BreakerPolicy {
        BreakerPolicy {
            failure_threshold: self.failure_threshold,
            cooldown: self.cooldown,
        }
    }
}

/// A provider descriptor paired with its adapter
struct RegisteredProvider {
    descriptor: ProviderDescriptor,
    adapter: Arc<dyn TextGenerationProvider>,
}

/// Collects registrations before the registry is frozen
pub struct RouterBuilder {
    config: RouterConfig,
    providers: Vec<RegisteredProvider>,
    metrics: Arc<dyn RoutingMetricsCollector>,
}

impl RouterBuilder {
    /// Register a provider; order breaks priority ties
    pub fn register(
        mut self,
        descriptor: ProviderDescriptor,
        adapter: Arc<dyn TextGenerationProvider>,
    ) -> Self {
        self.providers.push(RegisteredProvider {
            descriptor,
            adapter,
        });
        self
    }

    /// Use a metrics collector other than the null one
    pub fn with_metrics(mut self, metrics: Arc<dyn RoutingMetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Freeze the registry in priority order
    ///
    /// Fails on a zero threshold or a duplicate provider name.
    pub fn build(mut self) -> Result<Router> {
        if self.config.failure_threshold == 0 {
            return Err(Error::configuration("Failure threshold must be at least 1"));
        }

        let health = DashMap::with_capacity(self.providers.len());
        for provider in &self.providers {
            let name = provider.descriptor.name.clone();
            if health.insert(name, ProviderHealth::new()).is_some() {
                return Err(Error::configuration(format!(
                    "Provider registered twice: {}",
                    provider.descriptor.name
                )));
            }
        }

        // Stable sort keeps registration order among equal priorities
        self.providers.sort_by_key(|p| p.descriptor.priority);

        info!(
            providers = self.providers.len(),
            threshold = self.config.failure_threshold,
            cooldown = %humantime::format_duration(self.config.cooldown),
            "Router initialized"
        );

        Ok(Router {
            config: self.config,
            providers: self.providers,
            health,
            last_used: AtomicUsize::new(NO_PROVIDER),
            metrics: self.metrics,
        })
    }
}

/// Multi-provider router
///
/// # Example
///
/// ```ignore
/// let router = Router::builder(RouterConfig::default())
///     .register(ProviderDescriptor::new("groq", "Groq", 1), groq)
///     .register(ProviderDescriptor::new("gemini", "Gemini 2.0", 2), gemini)
///     .build()?;
///
/// let result = router.generate(&GenerationRequest::new("Hello")).await?;
/// println!("{} answered in {}ms", result.provider, result.latency_ms);
/// ```
pub struct Router {
    config: RouterConfig,
    providers: Vec<RegisteredProvider>,
    health: DashMap<String, ProviderHealth>,
    last_used: AtomicUsize,
    metrics: Arc<dyn RoutingMetricsCollector>,
}

impl Router {
    /// Start building a router
    pub fn builder(config: RouterConfig) -> RouterBuilder {
        RouterBuilder {
            config,
            providers: Vec::new(),
            metrics: Arc::new(NullMetricsCollector::new()),
        }
    }

    /// Router tuning in effect
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Registered descriptors in priority order
    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().map(|p| &p.descriptor)
    }

    /// Route a request to the first healthy provider that answers
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.generate_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Route a request, stopping as soon as `cancel` fires
    ///
    /// Cancellation while a provider call is in flight returns
    /// [`Error::Cancelled`] without recording anything against that provider
    /// and without trying the rest of the chain.
    pub async fn generate_with_cancellation(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult> {
        if let Err(e) = request.validate() {
            self.metrics.record_call(CallOutcome::Validation);
            return Err(e);
        }

        let candidates = self.eligible_indices(Instant::now());
        if candidates.is_empty() {
            warn!("No eligible providers, every breaker is open");
            self.metrics.record_call(CallOutcome::NoEligible);
            return Err(Error::NoEligibleProviders);
        }

        let mut failures = Vec::new();
        for index in candidates {
            let provider = &self.providers[index];
            let name = provider.descriptor.name.as_str();
            debug!(provider = %name, "Trying provider");

            let started = Instant::now();
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(provider = %name, "Request cancelled while provider call was in flight");
                    self.metrics.record_call(CallOutcome::Cancelled);
                    return Err(Error::Cancelled);
                }
                result = tokio::time::timeout(self.config.request_timeout, provider.adapter.invoke(request)) => {
                    result.unwrap_or(Err(ProviderError::Timeout(self.config.request_timeout)))
                }
            };

            match outcome {
                Ok(response) => {
                    let latency = started.elapsed();
                    self.record_success(name, latency);
                    self.last_used.store(index, Ordering::Release);
                    self.metrics.record_call(CallOutcome::Success);

                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    debug!(provider = %name, latency_ms, "Provider answered");
                    return Ok(GenerationResult {
                        response,
                        provider: name.to_string(),
                        latency_ms,
                    });
                }
                Err(error) => {
                    warn!(provider = %name, kind = %error.kind(), error = %error, "Provider call failed");
                    self.record_failure(name, &error);
                    failures.push(ProviderFailure::new(name, &error));
                }
            }
        }

        warn!(attempts = failures.len(), "All eligible providers failed");
        self.metrics.record_call(CallOutcome::Exhausted);
        Err(Error::AllProvidersExhausted { failures })
    }

    /// Eligible descriptors in priority order
    ///
    /// Runs the same cooldown check `generate` runs, so a provider whose
    /// cooldown has elapsed is closed again as a side effect.
    pub fn candidates(&self) -> Vec<ProviderDescriptor> {
        self.eligible_indices(Instant::now())
            .into_iter()
            .map(|i| self.providers[i].descriptor.clone())
            .collect()
    }

    /// Per-provider snapshots in priority order, including open providers
    ///
    /// Never mutates health state.
    pub fn get_stats(&self) -> Vec<ProviderStats> {
        let now = Instant::now();
        self.providers
            .iter()
            .filter_map(|p| {
                self.health
                    .get(&p.descriptor.name)
                    .map(|h| h.snapshot(&p.descriptor, now))
            })
            .collect()
    }

    /// Provider that served the most recent successful call
    pub fn last_used_provider(&self) -> Option<String> {
        let index = self.last_used.load(Ordering::Acquire);
        self.providers
            .get(index)
            .map(|p| p.descriptor.name.clone())
    }

    /// Stats plus the last used provider
    pub fn router_stats(&self) -> RouterStats {
        RouterStats {
            providers: self.get_stats(),
            last_used_provider: self.last_used_provider(),
        }
    }

    /// Recover expired cooldowns and collect the enabled providers
    fn eligible_indices(&self, now: Instant) -> Vec<usize> {
        let mut eligible = Vec::with_capacity(self.providers.len());
        for (index, provider) in self.providers.iter().enumerate() {
            let name = provider.descriptor.name.as_str();
            let Some(mut health) = self.health.get_mut(name) else {
                continue;
            };
            if health.try_recover(now) {
                info!(provider = %name, "Cooldown elapsed, provider re-enabled");
                self.metrics.record_circuit_state(name, CircuitState::Closed);
            }
            if health.is_enabled() {
                eligible.push(index);
            }
        }
        eligible
    }

    fn record_success(&self, name: &str, latency: Duration) {
        if let Some(mut health) = self.health.get_mut(name) {
            health.record_success(latency);
        }
        self.metrics.record_attempt(name, "success");
        self.metrics.record_latency(name, latency);
    }

    fn record_failure(&self, name: &str, error: &ProviderError) {
        let tripped = self.health.get_mut(name).map(|mut health| {
            let tripped = health.record_failure(Instant::now(), &self.config.policy());
            (tripped, health.consecutive_failures())
        });

        self.metrics.record_attempt(name, error.kind().as_str());
        if let Some((true, failures)) = tripped {
            warn!(
                provider = %name,
                failures,
                cooldown = %humantime::format_duration(self.config.cooldown),
                "Circuit breaker opened, provider disabled"
            );
            self.metrics.record_circuit_state(name, CircuitState::Open);
        }
    }
}
