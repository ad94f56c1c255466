//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, graceful shutdown)
//!     → middleware.rs (in-flight gauge + request log, outermost;
//!                      counter + histogram around the workload routes)
//!     → handlers.rs (probes, failure injection, simulated workloads)
//! ```

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer, ServeError};
