//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum Router with all drill routes
//! - Wire up middleware (request log, instrumentation, timeout, trace)
//! - Serve until a shutdown trigger, then drain within the grace period
//!
//! # Shutdown ordering
//! The graceful-shutdown future clears the readiness flag before it resolves,
//! so `/readyz` reads not-ready before the listener stops accepting. Drain is
//! bounded: overrunning the grace period yields [`ServeError::DrainTimeout`].

use std::future::IntoFuture;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{DrillConfig, WorkloadConfig};
use crate::health::ReadinessFlag;
use crate::http::handlers;
use crate::http::middleware::{log_requests, record_request};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::HttpMetrics;

/// Errors surfaced by the serve loop.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("graceful shutdown timed out after {grace:?} with requests still in flight")]
    DrainTimeout { grace: Duration },
}

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub readiness: ReadinessFlag,
    pub metrics: HttpMetrics,
    pub workload: WorkloadConfig,
}

/// HTTP server for the drill target.
pub struct HttpServer {
    router: Router,
    config: DrillConfig,
    readiness: ReadinessFlag,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and shared state.
    pub fn new(config: DrillConfig, readiness: ReadinessFlag, metrics: HttpMetrics) -> Self {
        let state = AppState {
            readiness: readiness.clone(),
            metrics,
            workload: config.workload.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            readiness,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DrillConfig, state: AppState) -> Router {
        // Counter + histogram wrap the workload routes only; probes and the
        // scrape endpoint stay out of the request metrics.
        let workload = Router::new()
            .route("/work", get(handlers::work))
            .route("/work/cpu", get(handlers::work_cpu))
            .route("/work/latency", get(handlers::work_latency))
            .route("/panic", get(handlers::request_failure))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                record_request,
            ));

        Router::new()
            .route("/healthz", get(handlers::liveness))
            .route("/readyz", get(handlers::readiness))
            .route("/fail/ready", get(handlers::fail_readiness))
            .route("/recover/ready", get(handlers::recover_readiness))
            .route("/metrics", get(handlers::metrics_exposition))
            .merge(workload)
            .with_state(state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            // Added last, so the request log and in-flight gauge sit outermost
            .layer(middleware::from_fn_with_state(state, log_requests))
            // Registered after the logging layer: the crash message must be
            // the last line the process emits
            .route("/crash", get(handlers::crash))
    }

    /// Run the server until SIGINT/SIGTERM, then drain and return.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServeError> {
        let shutdown = Shutdown::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            signals::wait_for_termination().await;
            trigger.trigger();
        });

        self.run_until(listener, shutdown).await
    }

    /// Run the server until the given coordinator is triggered.
    ///
    /// Split out from [`run`](Self::run) so tests can drive shutdown without
    /// raising OS signals.
    pub async fn run_until(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), ServeError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut drain_rx = shutdown.subscribe();
        let readiness = self.readiness.clone();
        let graceful = async move {
            let _ = drain_rx.recv().await;
            // The orchestrator must see not-ready before we stop accepting
            readiness.set_not_ready();
            tracing::info!("shutdown started");
        };

        let grace = Duration::from_secs(self.config.shutdown.grace_secs);
        let mut server = tokio::spawn(
            axum::serve(listener, self.router.into_make_service())
                .with_graceful_shutdown(graceful)
                .into_future(),
        );

        let mut triggered = shutdown.subscribe();
        tokio::select! {
            res = &mut server => {
                // Listener failed before any shutdown trigger
                return Ok(res??);
            }
            _ = triggered.recv() => {}
        }

        match tokio::time::timeout(grace, server).await {
            Ok(res) => {
                res??;
                tracing::info!("HTTP server stopped");
                Ok(())
            }
            Err(_) => Err(ServeError::DrainTimeout { grace }),
        }
    }
}
