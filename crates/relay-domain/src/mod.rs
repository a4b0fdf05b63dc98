//! # Relay Domain Layer
//!
//! Core types shared by every layer of the relay workspace: the generation
//! request/result shapes, the static provider descriptor, the statistics
//! snapshots returned to callers, the provider port, and the error taxonomy.
//!
//! The domain layer performs no I/O. Adapters live in `relay-providers`, the
//! router and its health tracking live in `relay-infrastructure`.

/// Domain constants (defaults shared across layers)
pub mod constants;
/// Error taxonomy
pub mod error;
/// Port traits implemented by outer layers
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use error::{Error, ProviderError, ProviderErrorKind, ProviderFailure, Result};
pub use ports::providers::TextGenerationProvider;
pub use value_objects::{
    ChatMessage, ChatRole, GenerationRequest, GenerationResult, ProviderDescriptor,
    ProviderStats, RouterStats,
};
