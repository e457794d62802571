//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sim_submissions_total` (counter): submit events by outcome
//! - `sim_threats_detected_total` (counter): sanitizer matches by pattern
//! - `sim_csrf_validations_total` (counter): CSRF checks by outcome
//!
//! Counters are cheap atomic increments; the exporter is optional and
//! bound to its own address so the simulator port stays clean.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Failure to install is logged
/// and otherwise ignored: the simulator works fine without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: &'static str) {
    counter!("sim_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_threat(pattern: &'static str) {
    counter!("sim_threats_detected_total", "pattern" => pattern).increment(1);
}

pub fn record_csrf(outcome: &'static str) {
    counter!("sim_csrf_validations_total", "outcome" => outcome).increment(1);
}
