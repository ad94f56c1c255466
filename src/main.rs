//! Drill Target
//!
//! A synthetic workload service built with Tokio and Axum, used as the target
//! of autoscaling and alerting drills.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 DRILL TARGET                  │
//!                       │                                               │
//!     Probe / Drill     │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!     ──────────────────┼─▶│  http   │──▶│middleware │──▶│ handlers │  │
//!                       │  │ server  │   │ log+instr │   │ /work ...│  │
//!                       │  └─────────┘   └───────────┘   └──────────┘  │
//!                       │                                               │
//!                       │  ┌─────────────────────────────────────────┐  │
//!                       │  │          Cross-Cutting Concerns          │  │
//!                       │  │  ┌────────┐ ┌────────┐ ┌─────────────┐  │  │
//!                       │  │  │ config │ │ health │ │observability│  │  │
//!                       │  │  └────────┘ └────────┘ └─────────────┘  │  │
//!                       │  │  ┌─────────────────────────────────┐    │  │
//!                       │  │  │   lifecycle (signals/shutdown)  │    │  │
//!                       │  │  └─────────────────────────────────┘    │  │
//!                       │  └─────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;

// Shared state
pub mod health;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DrillConfig;
use crate::health::ReadinessFlag;
use crate::http::HttpServer;
use crate::observability::HttpMetrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber: one JSON line per event on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drill_target=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init();

    tracing::info!("drill-target v0.1.0 starting");

    let config = DrillConfig::default();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        cpu_burn_ms = config.workload.cpu_burn_ms,
        latency_delay_ms = config.workload.latency_delay_ms,
        grace_secs = config.shutdown.grace_secs,
        "Configuration loaded"
    );

    // Build the owned metrics registry before anything can record into it
    let metrics = HttpMetrics::new()?;
    let readiness = ReadinessFlag::new();

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config, readiness, metrics);
    if let Err(e) = server.run(listener).await {
        // Drain overrun is reported but never blocks process exit
        tracing::error!(error = %e, "shutdown error");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
