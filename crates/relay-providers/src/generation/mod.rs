//! Text Generation Provider Implementations
//!
//! Turns a `GenerationRequest` into one completion string from one backend.
//! Every adapter builds its payload from the same ordering rules (system
//! context, history, prompt) so the router can swap backends freely.
//!
//! ## Available Providers
//!
//! | Provider | Wire format | Backends |
//! |----------|-------------|----------|
//! | OpenAICompatibleProvider | `/chat/completions` | Groq, SambaNova, OpenRouter |
//! | GeminiProvider | `generateContent` | Google Gemini |
//! | CloudflareProvider | Workers AI `run` | Cloudflare |
//! | NullGenerationProvider | none | Testing, offline |

pub mod cloudflare;
pub mod gemini;
pub mod helpers;
pub mod null;
pub mod openai_compatible;

// Re-export for convenience
pub use cloudflare::CloudflareProvider;
pub use gemini::GeminiProvider;
pub use helpers::{AdapterSettings, chat_messages, constructor};
pub use null::NullGenerationProvider;
pub use openai_compatible::OpenAICompatibleProvider;
