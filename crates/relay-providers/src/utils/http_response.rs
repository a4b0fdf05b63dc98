//! HTTP Response Utilities
//!
//! Helper functions for turning provider HTTP responses into completion text
//! or a classified [`ProviderError`]. These are shared utilities, not ports.

use std::time::Duration;

use relay_domain::ProviderError;
use reqwest::Response;

use crate::constants::{ERROR_BODY_PREVIEW_CHARS, RATE_LIMIT_MARKERS};

/// Format a diagnostic message for a provider error
fn provider_message(provider: &str, context: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{provider} {context}")
    } else {
        format!("{provider} {context}: {details}")
    }
}

/// Keep error bodies short enough for logs
fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Utilities for processing HTTP responses
///
/// Provides the response handling shared by every generation adapter.
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    ///
    /// # Returns
    /// Parsed JSON value on success, or the most specific error available
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(
                status.as_u16(),
                &error_text,
                provider_name,
            ));
        }

        response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(provider_message(
                provider_name,
                "response parse failed",
                &e.to_string(),
            ))
        })
    }

    /// Map a non-success status and its body to an error kind
    pub fn classify_status(code: u16, body: &str, provider_name: &str) -> ProviderError {
        let details = preview(body);
        let lowered = body.to_lowercase();

        match code {
            401 | 403 => ProviderError::Unauthenticated(provider_message(
                provider_name,
                &format!("authentication failed ({code})"),
                &details,
            )),
            429 => ProviderError::RateLimited(provider_message(
                provider_name,
                "rate limit exceeded",
                &details,
            )),
            _ if RATE_LIMIT_MARKERS.iter().any(|m| lowered.contains(m)) => {
                ProviderError::RateLimited(provider_message(
                    provider_name,
                    &format!("quota exceeded ({code})"),
                    &details,
                ))
            }
            500..=599 => ProviderError::Unknown(provider_message(
                provider_name,
                &format!("server error ({code})"),
                &details,
            )),
            _ => ProviderError::Unknown(provider_message(
                provider_name,
                &format!("request failed ({code})"),
                &details,
            )),
        }
    }

    /// Map a transport-level failure from `send()`
    pub fn map_send_error(error: &reqwest::Error, timeout: Duration, provider_name: &str) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(timeout)
        } else if error.is_connect() || error.is_request() {
            ProviderError::Unreachable(provider_message(
                provider_name,
                "HTTP request failed",
                &error.to_string(),
            ))
        } else {
            ProviderError::Unknown(provider_message(
                provider_name,
                "HTTP request failed",
                &error.to_string(),
            ))
        }
    }

    /// Extract the completion text found at a JSON pointer
    ///
    /// A missing, non-string or blank field is a malformed response.
    pub fn completion_text(
        body: &serde_json::Value,
        pointer: &str,
        provider_name: &str,
    ) -> Result<String, ProviderError> {
        body.pointer(pointer)
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::MalformedResponse(provider_message(
                    provider_name,
                    "response missing completion field",
                    pointer,
                ))
            })
    }
}
