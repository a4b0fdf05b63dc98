//! Routing configuration types
//!
//! Circuit breaker threshold, cooldown and the per-call timeout.

use std::time::Duration;

use relay_domain::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_FAILURE_THRESHOLD, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

/// Routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Consecutive failures that trip a provider
    pub failure_threshold: u32,

    /// Seconds a tripped provider stays out of rotation
    pub cooldown_secs: u64,

    /// Upper bound on a single adapter invocation, in seconds
    pub request_timeout_secs: u64,
}

impl RoutingConfig {
    /// Cooldown as a [`Duration`]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
