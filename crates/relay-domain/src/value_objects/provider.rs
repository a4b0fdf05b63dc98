//! Provider registration data

use serde::{Deserialize, Serialize};

/// Static configuration for one backend
///
/// Immutable once registered with the router. `priority` is a rank where
/// lower values are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Unique provider name (e.g. `groq`)
    pub name: String,
    /// Human readable name (e.g. `Groq`)
    pub display_name: String,
    /// Selection rank, lower first
    pub priority: u32,
    /// Model identifier requested from the backend
    #[serde(default)]
    pub model: String,
    /// Endpoint URL
    #[serde(default)]
    pub endpoint: String,
    /// Name of the credential the adapter reads (never the secret itself)
    #[serde(default)]
    pub credential_ref: Option<String>,
}

impl ProviderDescriptor {
    /// Create a descriptor with no connection parameters
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            priority,
            model: String::new(),
            endpoint: String::new(),
            credential_ref: None,
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the credential reference
    pub fn with_credential_ref(mut self, credential_ref: impl Into<String>) -> Self {
        self.credential_ref = Some(credential_ref.into());
        self
    }
}
