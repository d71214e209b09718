//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Summary cache (hits, misses)
//! - External services (book catalog, LLM)
//! - Teaser generation

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Summary Cache Metrics
// =============================================================================

/// Summary cache lookups by result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookblurb_cache_lookups_total",
            "Total summary cache lookups",
        ),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookblurb_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookblurb_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Volumes returned per catalog search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookblurb_search_results",
            "Number of volumes returned per catalog search",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 40.0]),
        &[],
    )
    .unwrap()
});

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bookblurb_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

/// Teasers generated (cache misses that reached the LLM and succeeded).
pub static TEASERS_GENERATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bookblurb_teasers_generated_total",
        "Total teasers generated by the language model",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record the outcome and duration of one external service call.
pub fn observe_external_call(service: &str, operation: &str, started: Instant, success: bool) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(started.elapsed().as_secs_f64());
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, if success { "success" } else { "error" }])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Cache
        Box::new(CACHE_LOOKUPS.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(LLM_TOKENS.clone()),
        // Teasers
        Box::new(TEASERS_GENERATED.clone()),
    ]
}
