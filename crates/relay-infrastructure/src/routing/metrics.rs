//! Routing metrics collection
//!
//! Emits through the `metrics` facade. Nothing is recorded unless the host
//! process installs a recorder (Prometheus exporter, statsd, ...).

use std::time::Duration;

use metrics::{counter, gauge, histogram};
use tracing::trace;

use crate::constants::{
    METRIC_BREAKER_OPEN, METRIC_BREAKER_TRANSITIONS, METRIC_PROVIDER_ATTEMPTS,
    METRIC_PROVIDER_LATENCY, METRIC_ROUTER_CALLS,
};
use crate::routing::health::CircuitState;

/// Outcome of a whole routed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// A provider answered
    Success,
    /// The request was rejected before routing
    Validation,
    /// Every provider was cooling down
    NoEligible,
    /// Every candidate failed
    Exhausted,
    /// The caller cancelled mid-flight
    Cancelled,
}

impl CallOutcome {
    /// Label value used for the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Validation => "validation",
            Self::NoEligible => "no_eligible",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Sink for routing metrics
pub trait RoutingMetricsCollector: Send + Sync {
    /// One adapter attempt finished; `outcome` is `success` or an error kind
    fn record_attempt(&self, provider: &str, outcome: &str);

    /// Latency of a successful attempt
    fn record_latency(&self, provider: &str, latency: Duration);

    /// A breaker changed state
    fn record_circuit_state(&self, provider: &str, state: CircuitState);

    /// A routed call finished
    fn record_call(&self, outcome: CallOutcome);
}

/// Collector backed by the `metrics` crate macros
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsFacadeCollector;

impl MetricsFacadeCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self
    }
}

impl RoutingMetricsCollector for MetricsFacadeCollector {
    fn record_attempt(&self, provider: &str, outcome: &str) {
        counter!(METRIC_PROVIDER_ATTEMPTS, "provider" => provider.to_string(), "outcome" => outcome.to_string())
            .increment(1);
    }

    fn record_latency(&self, provider: &str, latency: Duration) {
        histogram!(METRIC_PROVIDER_LATENCY, "provider" => provider.to_string())
            .record(latency.as_secs_f64());
    }

    fn record_circuit_state(&self, provider: &str, state: CircuitState) {
        counter!(METRIC_BREAKER_TRANSITIONS, "provider" => provider.to_string(), "state" => state.as_str())
            .increment(1);
        gauge!(METRIC_BREAKER_OPEN, "provider" => provider.to_string()).set(
            match state {
                CircuitState::Closed => 0.0,
                CircuitState::Open => 1.0,
            },
        );
        trace!(provider, state = %state, "Recorded circuit breaker transition");
    }

    fn record_call(&self, outcome: CallOutcome) {
        counter!(METRIC_ROUTER_CALLS, "outcome" => outcome.as_str()).increment(1);
    }
}

/// Collector that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMetricsCollector;

impl NullMetricsCollector {
    /// Create a new null collector
    pub fn new() -> Self {
        Self
    }
}

impl RoutingMetricsCollector for NullMetricsCollector {
    fn record_attempt(&self, _provider: &str, _outcome: &str) {}

    fn record_latency(&self, _provider: &str, _latency: Duration) {}

    fn record_circuit_state(&self, _provider: &str, _state: CircuitState) {}

    fn record_call(&self, _outcome: CallOutcome) {}
}
