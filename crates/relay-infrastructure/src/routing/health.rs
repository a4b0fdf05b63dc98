//! Per-provider health and circuit breaker state
//!
//! One [`ProviderHealth`] exists per registered provider. The router owns
//! them and performs every transition while holding the provider's map
//! entry, so an increment and the trip it causes happen together.

use std::time::Duration;

use relay_domain::{ProviderDescriptor, ProviderStats};
use tokio::time::Instant;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Provider is eligible for selection
    Closed,
    /// Provider is cooling down and skipped
    Open,
}

impl CircuitState {
    /// Get the state as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold and cooldown applied to every provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerPolicy {
    /// Consecutive failures that trip the breaker
    pub failure_threshold: u32,
    /// Time the provider stays open once tripped
    pub cooldown: Duration,
}

/// Mutable runtime health of one provider
#[derive(Debug, Clone)]
pub struct ProviderHealth {
    enabled: bool,
    consecutive_failures: u32,
    total_requests: u64,
    successful_requests: u64,
    average_latency_ms: f64,
    disabled_until: Option<Instant>,
    times_opened: u64,
}

impl Default for ProviderHealth {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderHealth {
    /// Fresh, closed health record
    pub fn new() -> Self {
        Self {
            enabled: true,
            consecutive_failures: 0,
            total_requests: 0,
            successful_requests: 0,
            average_latency_ms: 0.0,
            disabled_until: None,
            times_opened: 0,
        }
    }

    /// Whether the provider is currently selectable
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current breaker state
    pub fn state(&self) -> CircuitState {
        if self.enabled {
            CircuitState::Closed
        } else {
            CircuitState::Open
        }
    }

    /// Failures since the last success
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Lifetime attempts, successes and failures together
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Running mean latency of successful calls
    pub fn average_latency_ms(&self) -> f64 {
        self.average_latency_ms
    }

    /// End of the current cooldown, if open
    pub fn disabled_until(&self) -> Option<Instant> {
        self.disabled_until
    }

    /// How many times the breaker has tripped
    pub fn times_opened(&self) -> u64 {
        self.times_opened
    }

    /// Whether the cooldown has elapsed at `now` and the breaker may close
    pub fn cooldown_elapsed(&self, now: Instant) -> bool {
        matches!(self.disabled_until, Some(until) if now >= until)
    }

    /// Record a successful call
    ///
    /// Resets the failure streak and folds `latency` into the mean. A late
    /// success that lands while the breaker is open does not close it; the
    /// cooldown still runs to completion.
    pub fn record_success(&mut self, latency: Duration) {
        self.total_requests += 1;
        self.successful_requests += 1;
        self.consecutive_failures = 0;

        let sample = latency.as_secs_f64() * 1000.0;
        #[allow(clippy::cast_precision_loss)]
        let n = self.successful_requests as f64;
        self.average_latency_ms += (sample - self.average_latency_ms) / n;
    }

    /// Record a failed call, returning `true` when this failure tripped the breaker
    ///
    /// Failures that arrive while already open are counted but never trip
    /// again or extend the cooldown.
    pub fn record_failure(&mut self, now: Instant, policy: &BreakerPolicy) -> bool {
        self.total_requests += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        if self.enabled && self.consecutive_failures >= policy.failure_threshold {
            self.enabled = false;
            self.disabled_until = Some(now + policy.cooldown);
            self.times_opened += 1;
            return true;
        }
        false
    }

    /// Close the breaker if its cooldown has elapsed, returning `true` on recovery
    pub fn try_recover(&mut self, now: Instant) -> bool {
        if self.enabled || !self.cooldown_elapsed(now) {
            return false;
        }
        self.enabled = true;
        self.consecutive_failures = 0;
        self.disabled_until = None;
        true
    }

    /// Read-only snapshot as it would look after a recovery check at `now`
    pub fn snapshot(&self, descriptor: &ProviderDescriptor, now: Instant) -> ProviderStats {
        let recovered = !self.enabled && self.cooldown_elapsed(now);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let avg_latency_ms = self.average_latency_ms.round() as u64;
        ProviderStats {
            id: descriptor.name.clone(),
            name: descriptor.display_name.clone(),
            enabled: self.enabled || recovered,
            total_requests: self.total_requests,
            avg_latency_ms,
            failures: if recovered { 0 } else { self.consecutive_failures },
        }
    }
}
