//! Metrics collection and exposition.
//!
//! # Metrics
//! - `product_api_requests_total` (counter): requests by method, route, status
//! - `product_api_request_duration_seconds` (histogram): latency by method, route
//! - `product_api_products` (gauge): records currently stored
//! - `product_api_validation_failures_total` (counter): rejected fields
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with a scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();

    counter!(
        "product_api_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "product_api_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored products.
pub fn record_store_size(len: usize) {
    gauge!("product_api_products").set(len as f64);
}

/// Record a field rejected by the validator.
pub fn record_validation_failure(field: &'static str) {
    counter!("product_api_validation_failures_total", "field" => field).increment(1);
}
