//! Scripted providers and counting metrics shared by the router suites

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use relay_domain::{GenerationRequest, ProviderDescriptor, ProviderError, ProviderStats, TextGenerationProvider};
use relay_infrastructure::routing::{CallOutcome, CircuitState, Router, RouterConfig, RoutingMetricsCollector};

/// What a scripted provider does when invoked
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    Fail(ProviderError),
    Sleep(Duration),
    SleepThenFail(Duration, ProviderError),
}

/// Provider whose behavior can be changed mid-test
pub struct ScriptedProvider {
    name: String,
    behavior: Mutex<Behavior>,
    calls: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: AtomicUsize,
}

/// Decrements the in-flight count when an invocation ends or is dropped
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedProvider {
    pub fn new(name: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn replying(name: &str) -> Arc<Self> {
        Self::new(name, Behavior::Reply(format!("reply from {name}")))
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Self::new(
            name,
            Behavior::Fail(ProviderError::Unreachable(format!("{name} is down"))),
        )
    }

    pub fn set(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most invocations that were running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationProvider for ScriptedProvider {
    async fn invoke(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        let _guard = InFlight(Arc::clone(&self.in_flight));

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Reply(text) => Ok(text),
            Behavior::Fail(error) => Err(error),
            Behavior::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                Ok(format!("late reply from {}", self.name))
            }
            Behavior::SleepThenFail(duration, error) => {
                tokio::time::sleep(duration).await;
                Err(error)
            }
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Metrics collector counting breaker transitions and call outcomes
#[derive(Default)]
pub struct CountingMetrics {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub exhausted: AtomicUsize,
    pub successes: AtomicUsize,
}

impl RoutingMetricsCollector for CountingMetrics {
    fn record_attempt(&self, _provider: &str, _outcome: &str) {}

    fn record_latency(&self, _provider: &str, _latency: Duration) {}

    fn record_circuit_state(&self, _provider: &str, state: CircuitState) {
        match state {
            CircuitState::Open => self.opened.fetch_add(1, Ordering::SeqCst),
            CircuitState::Closed => self.closed.fetch_add(1, Ordering::SeqCst),
        };
    }

    fn record_call(&self, outcome: CallOutcome) {
        match outcome {
            CallOutcome::Exhausted => {
                self.exhausted.fetch_add(1, Ordering::SeqCst);
            }
            CallOutcome::Success => {
                self.successes.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

/// Build a router over `(name, priority, provider)` triples
pub fn router_with(
    config: RouterConfig,
    providers: &[(&str, u32, &Arc<ScriptedProvider>)],
    metrics: Option<Arc<CountingMetrics>>,
) -> Router {
    let mut builder = Router::builder(config);
    if let Some(metrics) = metrics {
        builder = builder.with_metrics(metrics);
    }
    for (name, priority, provider) in providers {
        let display = name.to_uppercase();
        let adapter: Arc<dyn TextGenerationProvider> = Arc::clone(*provider) as Arc<dyn TextGenerationProvider>;
        builder = builder.register(ProviderDescriptor::new(*name, display, *priority), adapter);
    }
    builder.build().expect("router builds")
}

/// Stats entry for one provider
pub fn stats_for(router: &Router, name: &str) -> ProviderStats {
    router
        .get_stats()
        .into_iter()
        .find(|s| s.id == name)
        .expect("provider registered")
}
