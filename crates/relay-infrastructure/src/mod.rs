//! # Relay - Infrastructure Layer
//!
//! Cross-cutting technical concerns and the routing core:
//!
//! - [`routing`] - router, circuit breaker and routing metrics
//! - [`config`] - figment based configuration loading and validation
//! - [`logging`] - tracing subscriber setup
//! - [`factory`] - builds the adapter chain from configuration
//! - [`error_ext`] - context helpers for foreign errors

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod factory;
pub mod logging;
pub mod routing;

pub use config::{AppConfig, ConfigLoader};
pub use factory::{ProviderFactory, build_router};
pub use routing::{Router, RouterBuilder, RouterConfig};
