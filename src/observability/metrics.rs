//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_submissions_total` (counter): submissions by kind, outcome
//! - `gateway_submission_duration_seconds` (histogram): end-to-end latency by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::gateway::SubmissionKind;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one submission.
pub fn record_submission(kind: SubmissionKind, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "gateway_submissions_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "gateway_submission_duration_seconds",
        "kind" => kind.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}
