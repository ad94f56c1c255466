//! Synthetic Workload Target Library

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::DrillConfig;
pub use health::ReadinessFlag;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::HttpMetrics;
