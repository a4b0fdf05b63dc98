//! Domain layer constants
//!
//! Defaults that belong to the routing domain itself. Transport and
//! configuration constants live in the infrastructure and provider crates.

// ============================================================================
// CIRCUIT BREAKER DEFAULTS
// ============================================================================

/// Consecutive failures that trip a provider's breaker
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Time a tripped provider stays out of rotation (5 minutes)
pub const DEFAULT_COOLDOWN_SECS: u64 = 5 * 60;

// ============================================================================
// REQUEST DEFAULTS
// ============================================================================

/// Upper bound for a single adapter invocation
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default sampling temperature sent to providers
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget sent to providers
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

// ============================================================================
// CALLER-FACING MESSAGES
// ============================================================================

/// Message shown to callers when no provider could serve a request
pub const UNAVAILABLE_MESSAGE: &str =
    "The assistant is temporarily unavailable. Please try again shortly.";
