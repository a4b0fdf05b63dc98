//! # Relay
//!
//! Multi-provider text generation router with automatic failover and
//! per-provider circuit breaking.
//!
//! This crate is the public facade. It re-exports the layers and hosts the
//! `relay` command line interface.
//!
//! ## Example
//!
//! ```ignore
//! use relay::domain::GenerationRequest;
//! use relay::infrastructure::{ConfigLoader, build_router};
//!
//! let config = ConfigLoader::new().load()?;
//! let router = build_router(&config)?;
//! let result = router.generate(&GenerationRequest::new("Hello")).await?;
//! println!("{}: {}", result.provider, result.response);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error taxonomy, value objects and the provider port
//! - `providers` - HTTP adapters (OpenAI-compatible, Gemini, Cloudflare)
//! - `infrastructure` - router, circuit breaker, config, logging
//! - `cli` - command line entry point

/// Domain layer - core types and the provider port
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use relay_domain::*;
}

/// Provider adapters
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use relay_providers::*;
}

/// Infrastructure layer - routing, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use relay_infrastructure::*;
}

pub mod cli;

// Re-export the types most callers need
pub use relay_domain::{
    ChatMessage, Error, GenerationRequest, GenerationResult, ProviderStats, Result, RouterStats,
};
pub use relay_infrastructure::{AppConfig, ConfigLoader, Router, RouterConfig, build_router};
