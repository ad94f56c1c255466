//! Health and readiness state.
//!
//! # Data Flow
//! ```text
//! /fail/ready    → flag cleared  → /readyz returns 503
//! /recover/ready → flag set      → /readyz returns 200
//! SIGTERM/SIGINT → flag cleared before the listener stops accepting
//! ```
//!
//! # Design Decisions
//! - Liveness (`/healthz`) has no state: the process is alive iff it answers
//! - Readiness is a single shared flag, owned by the lifecycle and injected
//!   into the handlers; no ambient global

pub mod readiness;

pub use readiness::ReadinessFlag;
