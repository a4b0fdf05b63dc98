//! Domain Port Interfaces
//!
//! Contracts that outer layers implement. The router in
//! `relay-infrastructure` depends only on these traits, never on a concrete
//! adapter from `relay-providers`.

/// External service provider ports
pub mod providers;

pub use providers::TextGenerationProvider;
