//! Provider Routing Infrastructure
//!
//! Priority-ordered failover across text generation providers, with a
//! per-provider circuit breaker and lazy cooldown recovery.
//!
//! ## Components
//!
//! - [`Router`] - registry, selection and failover loop
//! - [`ProviderHealth`] - breaker state machine for one provider
//! - [`RoutingMetricsCollector`] - metrics sink (`metrics` facade or null)

mod health;
mod metrics;
mod router;

pub use self::health::{BreakerPolicy, CircuitState, ProviderHealth};
pub use self::metrics::{
    CallOutcome, MetricsFacadeCollector, NullMetricsCollector, RoutingMetricsCollector,
};
pub use self::router::{Router, RouterBuilder, RouterConfig};
