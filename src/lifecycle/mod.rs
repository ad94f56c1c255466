//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     Trigger → readiness cleared → stop accepting → drain in-flight → exit
//! ```
//!
//! # Design Decisions
//! - Readiness flips before the listener stops accepting, so the orchestrator
//!   sheds traffic ahead of the drain
//! - Drain is bounded by a grace period; overrun is logged, never retried
//! - `/crash` bypasses all of this on purpose (abrupt nonzero exit)

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
