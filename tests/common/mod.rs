//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use drill_target::http::ServeError;
use drill_target::{DrillConfig, HttpMetrics, HttpServer, ReadinessFlag, Shutdown};

/// A drill target running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub readiness: ReadinessFlag,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), ServeError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn a server with the given config; shutdown is driven by the returned
/// coordinator instead of OS signals.
pub async fn spawn_drill(config: DrillConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let readiness = ReadinessFlag::new();
    let metrics = HttpMetrics::new().unwrap();
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config, readiness.clone(), metrics);
    let handle = tokio::spawn(server.run_until(listener, shutdown.clone()));

    TestServer {
        addr,
        readiness,
        shutdown,
        handle,
    }
}

/// Poll `/metrics` until the in-flight gauge reports `expected` requests.
///
/// The scrape itself is counted while it runs, so waiting for one pending
/// request means `expected = 2`. Confirms a request has actually reached its
/// handler before the caller proceeds (e.g. triggers shutdown under it).
#[allow(dead_code)]
pub async fn wait_for_in_flight(srv: &TestServer, expected: u64) {
    let client = reqwest::Client::new();
    let needle = format!("http_in_flight_requests {expected}");
    for _ in 0..250 {
        let body = client
            .get(srv.url("/metrics"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        if body.contains(&needle) {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("in-flight gauge never reached {expected}");
}

/// Default config with drill durations shortened for test runtime.
#[allow(dead_code)]
pub fn fast_config() -> DrillConfig {
    let mut config = DrillConfig::default();
    config.workload.cpu_burn_ms = 100;
    config.workload.latency_delay_ms = 300;
    config.shutdown.grace_secs = 5;
    config
}
