//! Prometheus metrics for observability.
//!
//! - HTTP request metrics (latency, counts, in flight)
//! - Catalog size and status breakdown (collected on scrape)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use tracing::error;

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookshelf_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bookshelf_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "bookshelf_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics (collected dynamically)
// =============================================================================

/// Books in the catalog.
pub static BOOKS_TOTAL: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("bookshelf_books_total", "Number of books in the catalog").unwrap()
});

/// Books by status label.
pub static BOOKS_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("bookshelf_books_by_status", "Current book count by status"),
        &["status"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry.register(Box::new(BOOKS_TOTAL.clone())).unwrap();
    registry
        .register(Box::new(BOOKS_BY_STATUS.clone()))
        .unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Refresh catalog gauges from the current state before a scrape.
pub fn collect_dynamic_metrics(state: &AppState) {
    let stats = state.catalog().stats();
    BOOKS_TOTAL.set(stats.total_books as i64);

    // Statuses can disappear between scrapes.
    BOOKS_BY_STATUS.reset();
    if let Some(breakdown) = stats.breakdown {
        for (status, count) in breakdown.statuses {
            BOOKS_BY_STATUS
                .with_label_values(&[status.as_str()])
                .set(count as i64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::testing::fixtures;
    use bookshelf_core::Config;
    use std::sync::Arc;

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("bookshelf_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_collect_dynamic_metrics_sets_catalog_gauges() {
        let state = AppState::new(Config::default(), Arc::new(fixtures::sample_catalog()));
        collect_dynamic_metrics(&state);

        let output = encode_metrics();
        assert!(output.contains("bookshelf_books_total"));
        assert!(output.contains("bookshelf_books_by_status{status=\"Read\"}"));
    }
}
