//! Value Objects
//!
//! Immutable types exchanged between the router, its adapters and callers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`GenerationRequest`] | Prompt, trailing history and system context |
//! | [`GenerationResult`] | Generated text plus serving provider and latency |
//! | [`ProviderDescriptor`] | Static registration data for one backend |
//! | [`ProviderStats`] | Read-only health snapshot of one provider |

/// Generation request/response shapes
pub mod generation;
/// Provider registration data
pub mod provider;
/// Statistics snapshots
pub mod stats;

pub use generation::{ChatMessage, ChatRole, GenerationRequest, GenerationResult};
pub use provider::ProviderDescriptor;
pub use stats::{ProviderStats, RouterStats};
