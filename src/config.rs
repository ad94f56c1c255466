//! Configuration schema definitions.
//!
//! The service deliberately has no configuration file, environment surface, or
//! CLI flags; all knobs live here with fixed defaults. The structs still derive
//! Serde traits so tests (and any future embedding) can construct overrides the
//! same way other services deserialize theirs.

use serde::{Deserialize, Serialize};

/// Root configuration for the drill target.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DrillConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Simulated workload durations.
    pub workload: WorkloadConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout in seconds. Must exceed the latency drill's delay,
    /// or the slow endpoint would time out instead of responding.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 15 }
    }
}

/// Durations for the simulated workload endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// How long `/work/cpu` busy-burns a core, in milliseconds.
    pub cpu_burn_ms: u64,

    /// How long `/work/latency` sleeps, in milliseconds.
    pub latency_delay_ms: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            cpu_burn_ms: 1200,
            latency_delay_ms: 2000,
        }
    }
}

/// Graceful shutdown settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Grace period for draining in-flight requests, in seconds.
    pub grace_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 10 }
    }
}
