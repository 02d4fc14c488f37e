//! Prometheus metrics for openai-bridge.
//!
//! Collectors live in one lazily built registry, so recording before
//! [`init_metrics`] is safe.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

static METRICS: OnceLock<BridgeMetrics> = OnceLock::new();

struct BridgeMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    completion_latency: HistogramVec,
    completion_errors: IntCounterVec,
}

fn metrics() -> &'static BridgeMetrics {
    METRICS.get_or_init(build_metrics)
}

fn build_metrics() -> BridgeMetrics {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("bridge_requests_total", "Total number of API requests"),
        &["endpoint", "status"],
    )
    .expect("Failed to create bridge_requests_total metric");

    let completion_latency = HistogramVec::new(
        HistogramOpts::new(
            "bridge_completion_latency_seconds",
            "Completion provider latency in seconds",
        )
        .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["endpoint", "mode"],
    )
    .expect("Failed to create bridge_completion_latency_seconds metric");

    let completion_errors = IntCounterVec::new(
        Opts::new(
            "bridge_completion_errors_total",
            "Total completion provider errors",
        ),
        &["endpoint", "error_type"],
    )
    .expect("Failed to create bridge_completion_errors_total metric");

    registry
        .register(Box::new(requests_total.clone()))
        .expect("Failed to register bridge_requests_total");
    registry
        .register(Box::new(completion_latency.clone()))
        .expect("Failed to register bridge_completion_latency_seconds");
    registry
        .register(Box::new(completion_errors.clone()))
        .expect("Failed to register bridge_completion_errors_total");

    BridgeMetrics {
        registry,
        requests_total,
        completion_latency,
        completion_errors,
    }
}

/// Initialize all metrics. Called once at startup; later calls are no-ops.
pub fn init_metrics() {
    if METRICS.get().is_none() {
        metrics();
        tracing::info!("Prometheus metrics initialized");
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let metric_families = metrics().registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record a finished API request.
pub fn record_request(endpoint: &str, status: u16) {
    let status = status.to_string();
    metrics()
        .requests_total
        .with_label_values(&[endpoint, status.as_str()])
        .inc();
}

/// Record completion provider latency.
pub fn record_completion_latency(endpoint: &str, mode: &str, duration_secs: f64) {
    metrics()
        .completion_latency
        .with_label_values(&[endpoint, mode])
        .observe(duration_secs);
}

/// Record a completion provider error.
pub fn record_completion_error(endpoint: &str, error_type: &str) {
    metrics()
        .completion_errors
        .with_label_values(&[endpoint, error_type])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_metrics_are_exported() {
        init_metrics();
        record_request("query", 200);
        record_completion_latency("query", "simulated", 0.001);
        record_completion_error("cases", "network");

        let text = get_metrics();
        assert!(text.contains("bridge_requests_total{endpoint=\"query\",status=\"200\"}"));
        assert!(text.contains("bridge_completion_latency_seconds"));
        assert!(text.contains("bridge_completion_errors_total"));
    }

    #[test]
    fn recording_before_init_is_safe() {
        record_completion_error("documents", "rate_limited");
        assert!(get_metrics().contains("rate_limited"));
    }
}
