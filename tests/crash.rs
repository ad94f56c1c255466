//! Process-failure route, exercised against the real binary.
//!
//! `/crash` terminates the process, so it cannot run against an in-process
//! server like the other suites; this spawns the compiled binary on its fixed
//! port and watches it die.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const ADDR: &str = "127.0.0.1:8080";

fn wait_for_listener(deadline: Instant) -> bool {
    while Instant::now() < deadline {
        if TcpStream::connect(ADDR).is_ok() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn crash_exits_nonzero_with_no_log_lines_after_the_crash_message() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_drill-target"))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    if !wait_for_listener(Instant::now() + Duration::from_secs(10)) {
        let _ = child.kill();
        panic!("server never started listening on {ADDR}");
    }

    let mut stream = TcpStream::connect(ADDR).unwrap();
    stream
        .write_all(b"GET /crash HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();

    // The socket may die mid-read once the process exits
    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);
    assert!(response.contains("crashing process"), "response: {response}");

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let logs = String::from_utf8_lossy(&output.stdout);
    assert!(logs.contains("crashing process"), "logs: {logs}");

    // Nothing after the crash message: /crash sits outside the logging layer,
    // so not even its own completion line follows
    let tail = logs.rsplit("crashing process").next().unwrap();
    assert!(!tail.contains("request completed"), "logs: {logs}");
}
