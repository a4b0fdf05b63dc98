//! Router behavior that depends on the clock
//!
//! Runs on a paused tokio clock so cooldowns and timeouts elapse instantly.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use relay_domain::{Error, GenerationRequest, ProviderErrorKind};
use relay_infrastructure::routing::RouterConfig;
use tokio_util::sync::CancellationToken;

use crate::support::{Behavior, CountingMetrics, ScriptedProvider, router_with, stats_for};

fn request() -> GenerationRequest {
    GenerationRequest::new("Summarize the meeting notes")
}

// =============================================================================
// Cooldown recovery
// =============================================================================

/// A provider opened at T is back in rotation at T+5m01s
#[tokio::test(start_paused = true)]
async fn test_cooldown_expiry_restores_provider() {
    let a = ScriptedProvider::failing("a");
    let b = ScriptedProvider::replying("b");
    let metrics = Arc::new(CountingMetrics::default());
    let router = router_with(
        RouterConfig::default(),
        &[("a", 1, &a), ("b", 2, &b)],
        Some(Arc::clone(&metrics)),
    );
    for _ in 0..3 {
        router.generate(&request()).await.unwrap();
    }
    a.set(Behavior::Reply("a recovered".into()));

    tokio::time::advance(Duration::from_secs(4 * 60 + 59)).await;
    assert_eq!(router.generate(&request()).await.unwrap().provider, "b");
    assert_eq!(a.calls(), 3);

    tokio::time::advance(Duration::from_secs(2)).await;
    let candidates: Vec<_> = router.candidates().into_iter().map(|d| d.name).collect();
    assert_eq!(candidates, ["a", "b"]);

    let result = router.generate(&request()).await.unwrap();
    assert_eq!(result.provider, "a");
    let stats = stats_for(&router, "a");
    assert!(stats.enabled);
    assert_eq!(stats.failures, 0);
    assert_eq!(metrics.closed.load(Ordering::SeqCst), 1);
}

/// Stats show the recovered view once the cooldown has passed, without a generate call
#[tokio::test(start_paused = true)]
async fn test_stats_reflect_elapsed_cooldown() {
    let a = ScriptedProvider::failing("a");
    let router = router_with(
        RouterConfig::default().with_cooldown(Duration::from_secs(60)),
        &[("a", 1, &a)],
        None,
    );
    for _ in 0..3 {
        router.generate(&request()).await.unwrap_err();
    }
    assert!(!stats_for(&router, "a").enabled);

    tokio::time::advance(Duration::from_secs(61)).await;
    let stats = stats_for(&router, "a");
    assert!(stats.enabled);
    assert_eq!(stats.failures, 0);
}

/// A provider that fails again after recovering starts a fresh streak
#[tokio::test(start_paused = true)]
async fn test_recovered_provider_can_trip_again() {
    let a = ScriptedProvider::failing("a");
    let b = ScriptedProvider::replying("b");
    let metrics = Arc::new(CountingMetrics::default());
    let router = router_with(
        RouterConfig::default(),
        &[("a", 1, &a), ("b", 2, &b)],
        Some(Arc::clone(&metrics)),
    );
    for _ in 0..3 {
        router.generate(&request()).await.unwrap();
    }

    tokio::time::advance(Duration::from_secs(301)).await;
    router.generate(&request()).await.unwrap();
    assert_eq!(stats_for(&router, "a").failures, 1);
    assert!(stats_for(&router, "a").enabled);

    router.generate(&request()).await.unwrap();
    router.generate(&request()).await.unwrap();
    assert!(!stats_for(&router, "a").enabled);
    assert_eq!(metrics.opened.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Timeouts
// =============================================================================

/// A hung provider is cut off at the request timeout and the next one answers
#[tokio::test(start_paused = true)]
async fn test_timeout_falls_through() {
    let slow = ScriptedProvider::new("slow", Behavior::Sleep(Duration::from_secs(120)));
    let fast = ScriptedProvider::replying("fast");
    let router = router_with(
        RouterConfig::default().with_request_timeout(Duration::from_secs(30)),
        &[("slow", 1, &slow), ("fast", 2, &fast)],
        None,
    );

    let result = router.generate(&request()).await.unwrap();

    assert_eq!(result.provider, "fast");
    assert_eq!(stats_for(&router, "slow").failures, 1);
}

/// A timeout is reported with its own kind
#[tokio::test(start_paused = true)]
async fn test_timeout_kind_is_reported() {
    let slow = ScriptedProvider::new("slow", Behavior::Sleep(Duration::from_secs(120)));
    let router = router_with(
        RouterConfig::default().with_request_timeout(Duration::from_secs(5)),
        &[("slow", 1, &slow)],
        None,
    );

    let err = router.generate(&request()).await.unwrap_err();

    let Error::AllProvidersExhausted { failures } = err else {
        panic!("expected exhaustion");
    };
    assert_eq!(failures[0].kind, ProviderErrorKind::Timeout);
}

/// Latency of a successful call is measured on the router clock
#[tokio::test(start_paused = true)]
async fn test_latency_is_reported() {
    let a = ScriptedProvider::new("a", Behavior::Sleep(Duration::from_millis(250)));
    let router = router_with(RouterConfig::default(), &[("a", 1, &a)], None);

    let result = router.generate(&request()).await.unwrap();

    assert!((250..260).contains(&result.latency_ms));
    assert!((250..260).contains(&stats_for(&router, "a").avg_latency_ms));
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cancelling mid-call stops routing and penalizes nobody
#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_without_penalty() {
    let slow = ScriptedProvider::new("slow", Behavior::Sleep(Duration::from_secs(20)));
    let next = ScriptedProvider::replying("next");
    let router = router_with(
        RouterConfig::default(),
        &[("slow", 1, &slow), ("next", 2, &next)],
        None,
    );
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let err = router
        .generate_with_cancellation(&request(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(slow.calls(), 1);
    assert_eq!(next.calls(), 0);
    let stats = stats_for(&router, "slow");
    assert_eq!((stats.total_requests, stats.failures), (0, 0));
    assert_eq!(router.last_used_provider(), None);
}

/// An already-cancelled token never reaches an adapter
#[tokio::test]
async fn test_precancelled_request_makes_no_calls() {
    let a = ScriptedProvider::replying("a");
    let router = router_with(RouterConfig::default(), &[("a", 1, &a)], None);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = router
        .generate_with_cancellation(&request(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(a.calls(), 0);
}
