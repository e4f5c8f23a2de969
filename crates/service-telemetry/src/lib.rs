//! # Service Telemetry
//!
//! Logging bootstrap shared by the food-delivery service binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use service_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_service("restaurant-service");
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SERVICE_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SERVICE_JSON_LOGS` | `false` (`true` in containers) | Emit JSON lines |
//! | `SERVICE_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}
