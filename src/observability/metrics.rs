//! Metrics collection and exposition.
//!
//! # Metrics
//! - `todo_api_requests_total` (counter): requests by method, status
//! - `todo_api_request_duration_seconds` (histogram): latency distribution
//! - `todo_api_users` (gauge): registered users
//! - `todo_api_todos` (gauge): todos across all users

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::store::StoreStats;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::warn!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    counter!("todo_api_requests_total", "method" => method.clone(), "status" => status.clone())
        .increment(1);
    histogram!("todo_api_request_duration_seconds", "method" => method, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(stats: StoreStats) {
    gauge!("todo_api_users").set(stats.users as f64);
    gauge!("todo_api_todos").set(stats.todos as f64);
}
