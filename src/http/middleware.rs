//! Request instrumentation and logging middleware.
//!
//! Composition order (outside in): request log + in-flight gauge wrap the
//! route tree; the counter/histogram wrapper is layered onto the workload
//! routes only. `/crash` sits outside both, so the crash message stays the
//! process's final log line.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::server::AppState;
use crate::observability::HttpMetrics;

/// Instrumentation wrapper: record latency (by path) and count (by path and
/// final status code) for the inner handler. Purely observational; the
/// response passes through untouched.
pub async fn record_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    state
        .metrics
        .observe_request(&path, response.status().as_u16(), start.elapsed());
    response
}

/// Decrements the in-flight gauge on drop, so the gauge balances even when
/// the inner handler panics.
struct InFlightGuard {
    metrics: HttpMetrics,
}

impl InFlightGuard {
    fn new(metrics: HttpMetrics) -> Self {
        metrics.inc_in_flight();
        Self { metrics }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.metrics.dec_in_flight();
    }
}

/// Logging wrapper, outermost: track the in-flight gauge around the request
/// and emit one structured line per completion.
pub async fn log_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().clone();
    let _in_flight = InFlightGuard::new(state.metrics.clone());
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        path = %path,
        method = %method,
        code = response.status().as_u16(),
        ms = start.elapsed().as_millis() as u64,
        "request completed"
    );
    response
}
