//! Per-request metrics.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics;

pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();

    let response = next.run(req).await;

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}
