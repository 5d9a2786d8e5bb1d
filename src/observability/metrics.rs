//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vitrine_requests_total` (counter): requests by method and status
//! - `vitrine_request_duration_seconds` (histogram): latency distribution
//! - `vitrine_rate_limited_total` (counter): 429s by path
//! - `vitrine_leads_created_total` (counter): accepted contact submissions
//! - `vitrine_analytics_events_total` (counter): ingested events by name

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "vitrine_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("vitrine_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a rate-limited (denied) request.
pub fn record_rate_limited(path: &str) {
    counter!("vitrine_rate_limited_total", "path" => path.to_string()).increment(1);
}

/// Record an accepted contact submission.
pub fn record_lead_created() {
    counter!("vitrine_leads_created_total").increment(1);
}

/// Record an ingested analytics event.
pub fn record_analytics_event(name: &str) {
    counter!("vitrine_analytics_events_total", "event" => name.to_string()).increment(1);
}
