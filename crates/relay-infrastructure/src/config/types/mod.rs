//! Configuration types

pub mod app;
pub mod logging;
pub mod providers;
pub mod routing;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use providers::{ProviderConfig, ProviderKind, default_providers};
pub use routing::RoutingConfig;
