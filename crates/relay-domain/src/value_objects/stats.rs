//! Statistics snapshots

use serde::Serialize;

/// Read-only snapshot of one provider's health
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    /// Unique provider name
    #[serde(skip_serializing)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the provider is currently eligible for selection
    pub enabled: bool,
    /// Lifetime attempts (successes and failures)
    pub total_requests: u64,
    /// Mean latency of successful calls, rounded to whole milliseconds
    pub avg_latency_ms: u64,
    /// Consecutive failures since the last success
    pub failures: u32,
}

/// Router-wide statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterStats {
    /// Per-provider snapshots in priority order
    pub providers: Vec<ProviderStats>,
    /// Provider that served the most recent successful call
    pub last_used_provider: Option<String>,
}
