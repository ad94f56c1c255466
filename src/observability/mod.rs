//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware produce:
//!     → metrics.rs (request counter, latency histogram, in-flight gauge)
//!     → tracing events (one JSON log line per completed request)
//!
//! Consumers:
//!     → Metrics endpoint (Prometheus scrape of the owned registry)
//!     → Log aggregation (stdout)
//! ```
//!
//! # Design Decisions
//! - Metrics registry is an owned value built at startup and shared through
//!   the axum state, not a process global
//! - Metric updates are cheap (atomic increments)
//! - Label cardinality is bounded by the fixed route table

pub mod metrics;

pub use metrics::HttpMetrics;
