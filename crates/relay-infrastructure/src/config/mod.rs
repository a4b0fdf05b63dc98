//! Configuration management
//!
//! Layered configuration built with figment: compiled defaults, an optional
//! TOML file, then `RELAY__` environment overrides.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, LoggingConfig, ProviderConfig, ProviderKind, RoutingConfig, default_providers,
};
