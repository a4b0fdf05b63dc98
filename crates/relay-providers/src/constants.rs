//! Provider Constants
//!
//! Constants specific to provider implementations. Routing defaults live in
//! `relay-domain`, loader and logging constants in `relay-infrastructure`.

// ============================================================================
// DEFAULT ENDPOINTS
// ============================================================================

/// Groq OpenAI-compatible chat completions endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// SambaNova OpenAI-compatible chat completions endpoint
pub const SAMBANOVA_ENDPOINT: &str = "https://api.sambanova.ai/v1/chat/completions";

/// OpenRouter OpenAI-compatible chat completions endpoint
pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Gemini generateContent endpoint; `{model}` is substituted at call time
pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent";

/// Cloudflare Workers AI endpoint; `{account_id}` and `{model}` are substituted at call time
pub const CLOUDFLARE_ENDPOINT: &str =
    "https://api.cloudflare.com/client/v4/accounts/{account_id}/ai/run/{model}";

/// Placeholder replaced with the configured model
pub const MODEL_PLACEHOLDER: &str = "{model}";

/// Placeholder replaced with the Cloudflare account id
pub const CLOUDFLARE_ACCOUNT_PLACEHOLDER: &str = "{account_id}";

// ============================================================================
// WIRE CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Gemini API key header
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// Model turn Gemini receives right after the system context
pub const GEMINI_CONTEXT_ACK: &str =
    "I understand. I will provide accurate, helpful responses based on this context.";

/// Body fragments that indicate quota exhaustion on a non-429 status
pub const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "rate_limit",
    "quota",
    "too many requests",
    "resource_exhausted",
];

/// Maximum characters of an error body kept in diagnostics
pub const ERROR_BODY_PREVIEW_CHARS: usize = 300;

// ============================================================================
// HTTP CLIENT CONSTANTS
// ============================================================================

/// HTTP client maximum idle connections per host
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client idle connection timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// HTTP TCP keep-alive interval in seconds
pub const HTTP_KEEPALIVE_SECS: u64 = 60;

/// Null provider canned reply
pub const NULL_PROVIDER_REPLY: &str = "This is a placeholder response.";
