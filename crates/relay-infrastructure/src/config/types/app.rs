//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::logging::LoggingConfig;
pub use super::providers::{ProviderConfig, ProviderKind, default_providers};
pub use super::routing::RoutingConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Circuit breaker and timeout configuration
    pub routing: RoutingConfig,
    /// Provider chain
    pub providers: Vec<ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            routing: RoutingConfig::default(),
            providers: default_providers(),
        }
    }
}
