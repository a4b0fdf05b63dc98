//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | TextGenerationProvider | One backend text-generation service |

/// Text generation provider port
pub mod generation;

pub use generation::TextGenerationProvider;
