//! Drain ordering and grace-period tests.

use std::time::{Duration, Instant};

use drill_target::http::ServeError;

mod common;

#[tokio::test]
async fn shutdown_clears_readiness_before_the_server_stops() {
    let srv = common::spawn_drill(common::fast_config()).await;

    let res = reqwest::get(srv.url("/readyz")).await.unwrap();
    assert_eq!(res.status(), 200);

    srv.shutdown.trigger();

    // run_until resolves only after the graceful future has flipped the flag,
    // so observing a clean exit proves the ordering.
    srv.handle.await.unwrap().unwrap();
    assert!(!srv.readiness.is_ready());
}

#[tokio::test]
async fn in_flight_request_completes_during_drain() {
    let mut config = common::fast_config();
    config.workload.latency_delay_ms = 500;
    let srv = common::spawn_drill(config).await;

    let url = srv.url("/work/latency");
    let request = tokio::spawn(async move { reqwest::get(url).await });

    // Start draining only once the request is confirmed inside its handler
    common::wait_for_in_flight(&srv, 2).await;
    srv.shutdown.trigger();

    let res = request.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);

    srv.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn drain_overrunning_the_grace_period_is_an_error() {
    let mut config = common::fast_config();
    config.workload.latency_delay_ms = 3000;
    config.shutdown.grace_secs = 1;
    let srv = common::spawn_drill(config).await;

    let url = srv.url("/work/latency");
    let request = tokio::spawn(async move { reqwest::get(url).await });

    common::wait_for_in_flight(&srv, 2).await;
    let start = Instant::now();
    srv.shutdown.trigger();

    let err = srv.handle.await.unwrap().unwrap_err();
    assert!(matches!(err, ServeError::DrainTimeout { .. }));

    // Gave up at the grace boundary, well before the 3s request finished
    let waited = start.elapsed();
    assert!(waited >= Duration::from_secs(1), "waited {waited:?}");
    assert!(waited < Duration::from_secs(3), "waited {waited:?}");

    request.abort();
}
