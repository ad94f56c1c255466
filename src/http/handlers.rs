//! Route handlers for probes, failure injection, and simulated workloads.
//!
//! Handlers are stateless apart from the shared readiness flag; side effects
//! are limited to metrics, logs, and (for `/crash`) process termination.

use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::server::AppState;

/// JSON body for the `/work` family of endpoints.
#[derive(Debug, Serialize)]
pub struct WorkResponse {
    pub ok: bool,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    pub time: String,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Liveness probe. Always 200; the process is alive iff it answers at all.
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Readiness probe. 503 while the flag is cleared.
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.readiness.is_ready() {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    }
}

/// Inject a readiness failure: the orchestrator stops routing traffic here
/// until `/recover/ready` is called.
pub async fn fail_readiness(State(state): State<AppState>) -> impl IntoResponse {
    state.readiness.set_not_ready();
    tracing::warn!("readiness failure injected");
    (StatusCode::OK, "readiness=false")
}

/// Clear an injected readiness failure.
pub async fn recover_readiness(State(state): State<AppState>) -> impl IntoResponse {
    state.readiness.set_ready();
    tracing::info!("readiness recovered");
    (StatusCode::OK, "readiness=true")
}

/// Simulated request-level failure: a deliberate 500 for alert pipelines.
pub async fn request_failure() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "intentional request failure")
}

/// Simulated process failure: respond, then exit nonzero with no drain.
pub async fn crash() -> impl IntoResponse {
    tracing::error!("crashing process");
    tokio::spawn(async {
        // Short delay so the response body reaches the socket before we die
        tokio::time::sleep(Duration::from_millis(100)).await;
        std::process::exit(1);
    });
    "crashing process\n"
}

/// Baseline workload: immediate success, no simulated trouble.
pub async fn work() -> impl IntoResponse {
    Json(WorkResponse {
        ok: true,
        mode: "fine",
        burn: None,
        delay: None,
        time: now_rfc3339(),
    })
}

/// CPU workload: burn a full core for the configured duration, then respond.
/// Drives CPU-utilization autoscaling signals.
pub async fn work_cpu(State(state): State<AppState>) -> Response {
    let burn_ms = state.workload.cpu_burn_ms;
    let burn = Duration::from_millis(burn_ms);

    // Burn on the blocking pool so the async workers keep serving probes
    if tokio::task::spawn_blocking(move || burn_cpu(burn)).await.is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "burn task failed").into_response();
    }

    Json(WorkResponse {
        ok: true,
        mode: "cpu",
        burn: Some(format!("{}ms", burn_ms)),
        delay: None,
        time: now_rfc3339(),
    })
    .into_response()
}

/// Latency workload: idle wait for the configured delay, then respond.
/// Drives latency alerts without moving CPU.
pub async fn work_latency(State(state): State<AppState>) -> impl IntoResponse {
    let delay_ms = state.workload.latency_delay_ms;
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    Json(WorkResponse {
        ok: true,
        mode: "latency",
        burn: None,
        delay: Some(format_delay(delay_ms)),
        time: now_rfc3339(),
    })
}

/// Metrics scrape endpoint: text exposition of the owned registry.
pub async fn metrics_exposition(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "metrics encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

/// Busy-wait on integer arithmetic until the deadline. Must not yield or
/// sleep: the point is observable CPU utilization, and an optimized-away loop
/// would report sub-millisecond latency.
pub(crate) fn burn_cpu(duration: Duration) {
    let deadline = Instant::now() + duration;
    let mut x: u64 = 1;
    while Instant::now() < deadline {
        x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        if x % 7 == 0 {
            x ^= x << 13;
        }
        std::hint::black_box(x);
    }
}

fn format_delay(delay_ms: u64) -> String {
    if delay_ms % 1000 == 0 {
        format!("{}s", delay_ms / 1000)
    } else {
        format!("{}ms", delay_ms)
    }
}
