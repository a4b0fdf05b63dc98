//! Error handling types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::UNAVAILABLE_MESSAGE;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the relay router
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided by the caller (never reaches a provider)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Every registered provider is currently tripped
    #[error("No eligible providers: every provider is cooling down")]
    NoEligibleProviders,

    /// Every eligible provider was tried and failed within one call
    #[error("All providers exhausted after {} attempt(s)", failures.len())]
    AllProvidersExhausted {
        /// One entry per provider attempted, in attempt order
        failures: Vec<ProviderFailure>,
    },

    /// The caller cancelled the request while a provider call was in flight
    #[error("Request cancelled by caller")]
    Cancelled,

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Caller-facing classification
impl Error {
    /// Whether this error means "temporarily unavailable, retry later"
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::NoEligibleProviders | Self::AllProvidersExhausted { .. }
        )
    }

    /// Whether this error is a rejection of the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Text that is safe to show to an end user
    ///
    /// Never includes which providers failed or why.
    pub fn caller_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => message.clone(),
            Self::Cancelled => "Request cancelled".to_string(),
            _ => UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

/// Coarse classification of an adapter failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Missing or rejected credential
    Unauthenticated,
    /// HTTP 429 or quota exhaustion
    RateLimited,
    /// Connection could not be established
    Unreachable,
    /// Successful status without the expected completion field
    MalformedResponse,
    /// The call exceeded its time budget
    Timeout,
    /// Anything else
    Unknown,
}

impl ProviderErrorKind {
    /// Stable label used in logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::RateLimited => "rate_limited",
            Self::Unreachable => "unreachable",
            Self::MalformedResponse => "malformed_response",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a provider adapter
///
/// Adapters fail fast and once; the router converts every variant into a
/// health update and moves on to the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Missing or invalid credential
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// Provider refused the call because of rate or quota limits
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider could not be reached
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// Provider answered successfully but without a completion
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Provider did not answer within the time budget
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Any other failure
    #[error("{0}")]
    Unknown(String),
}

impl ProviderError {
    /// Classification of this error
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::Unauthenticated(_) => ProviderErrorKind::Unauthenticated,
            Self::RateLimited(_) => ProviderErrorKind::RateLimited,
            Self::Unreachable(_) => ProviderErrorKind::Unreachable,
            Self::MalformedResponse(_) => ProviderErrorKind::MalformedResponse,
            Self::Timeout(_) => ProviderErrorKind::Timeout,
            Self::Unknown(_) => ProviderErrorKind::Unknown,
        }
    }
}

/// One failed attempt recorded during a routed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    /// Unique provider name
    pub provider: String,
    /// Classified failure
    pub kind: ProviderErrorKind,
    /// Adapter diagnostic message
    pub message: String,
}

impl ProviderFailure {
    /// Build a failure record from an adapter error
    pub fn new(provider: impl Into<String>, error: &ProviderError) -> Self {
        Self {
            provider: provider.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Infrastructure {
            message: s.into(),
            source: None,
        }
    }
}
