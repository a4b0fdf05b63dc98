//! Infrastructure layer constants
//!
//! Configuration file discovery, environment overrides and logging defaults.
//! Routing defaults live in `relay_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "relay.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "relay";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "RELAY";

/// Separator between nested keys in environment overrides (`RELAY__ROUTING__COOLDOWN_SECS`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable that overrides the configured log filter
pub const LOG_ENV_VAR: &str = "RELAY_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file stem when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "relay";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Counter of adapter attempts, labelled by provider and outcome
pub const METRIC_PROVIDER_ATTEMPTS: &str = "relay_provider_attempts_total";

/// Histogram of successful call latency in seconds, labelled by provider
pub const METRIC_PROVIDER_LATENCY: &str = "relay_provider_latency_seconds";

/// Counter of breaker transitions, labelled by provider and state
pub const METRIC_BREAKER_TRANSITIONS: &str = "relay_circuit_breaker_transitions_total";

/// Gauge set to 1 while a provider's breaker is open
pub const METRIC_BREAKER_OPEN: &str = "relay_circuit_breaker_open";

/// Counter of routed calls, labelled by outcome
pub const METRIC_ROUTER_CALLS: &str = "relay_router_calls_total";
