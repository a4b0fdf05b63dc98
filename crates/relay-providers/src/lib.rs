//! # Relay - Provider Implementations
//!
//! This crate contains the text generation adapters. Each adapter implements
//! the `TextGenerationProvider` port defined in `relay-domain` and knows
//! nothing about routing, health, or failover.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Generation | `TextGenerationProvider` | OpenAI-compatible, Gemini, Cloudflare, Null |
//!
//! ## Usage
//!
//! ```ignore
//! use relay_providers::generation::{AdapterSettings, GeminiProvider};
//! use relay_providers::http::HttpClientConfig;
//! ```

// Re-export relay-domain types commonly used with providers
pub use relay_domain::error::{Error, ProviderError, Result};
pub use relay_domain::ports::providers::TextGenerationProvider;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// HTTP client configuration shared by API-based providers
pub mod http;

/// Text generation provider implementations
///
/// Implements `TextGenerationProvider` for the supported LLM APIs.
pub mod generation;
