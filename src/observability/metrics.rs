//! Metrics collection and exposition.
//!
//! # Metrics
//! - `product_requests_total` (counter): requests by method, route, status
//! - `product_request_duration_seconds` (histogram): latency by method, route
//! - `product_store_records` (gauge): products currently stored

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "product_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "product_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Publish the current number of stored products.
pub fn record_store_size(records: usize) {
    metrics::gauge!("product_store_records").set(records as f64);
}

/// Axum middleware recording count and latency for every request.
///
/// Requests that matched no route are labelled `unmatched` so arbitrary
/// paths cannot blow up label cardinality.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
