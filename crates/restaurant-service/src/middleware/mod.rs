//! Middleware stack for the inbound HTTP endpoints.
//!
//! Layer order: Request → Tracing → Timeout → BodyLimit (tower-http) → Handler

pub mod timeout;
pub mod tracing;

pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;
