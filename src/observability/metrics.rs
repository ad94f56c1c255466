//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): total requests by path, status code
//! - `http_request_duration_seconds` (histogram): latency by path, default buckets
//! - `http_in_flight_requests` (gauge): requests currently being served

use std::sync::Arc;
use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// HTTP metrics over an owned Prometheus registry.
///
/// Built once at startup and cloned into the axum state; all clones share the
/// same underlying instruments.
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Arc<Registry>,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    in_flight: IntGauge,
}

impl HttpMetrics {
    /// Create the registry and register all instruments.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails (e.g. duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["path", "code"],
        )?;

        // Default buckets cover typical web latencies and both drill durations
        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Request latency in seconds",
            ),
            &["path"],
        )?;

        let in_flight = IntGauge::new(
            "http_in_flight_requests",
            "Current number of in-flight HTTP requests.",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            request_duration,
            in_flight,
        })
    }

    /// Record one completed request: latency by path, count by path and code.
    pub fn observe_request(&self, path: &str, code: u16, elapsed: Duration) {
        self.request_duration
            .with_label_values(&[path])
            .observe(elapsed.as_secs_f64());
        self.requests_total
            .with_label_values(&[path, &code.to_string()])
            .inc();
    }

    pub fn inc_in_flight(&self) {
        self.in_flight.inc();
    }

    pub fn dec_in_flight(&self) {
        self.in_flight.dec();
    }

    /// Render every registered instrument in Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
