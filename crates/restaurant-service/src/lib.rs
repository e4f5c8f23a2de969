//! Restaurant Service - order event subscriber for the food-delivery network.
//!
//! On startup the service registers interest in a topic with the message
//! broker by advertising its callback URL, then serves the endpoint the broker
//! pushes matching events to.
//!
//! # Architecture
//!
//! ```text
//!   ┌────────────────────────── restaurant-service ──────────────────────────┐
//!   │                                                                         │
//!   │  Subscriber ── (warm-up, one POST {"topic","url"}) ──────────┐          │
//!   │      │                                                       │          │
//!   │  SubscriptionTracker ◄── outcome          GET /health        │          │
//!   │                                            GET /menu         │          │
//!   │  POST /events ──► decode Event ──► Fulfillment::begin        │          │
//!   │      ▲                                                       │          │
//!   └──────┼───────────────────────────────────────────────────────┼──────────┘
//!          │ push (repeated, unordered)                            ▼
//!          └──────────────────────────── Message Broker ◄── /subscribe
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use restaurant_service::{RestaurantService, ServiceConfig};
//!
//! let service = RestaurantService::new(ServiceConfig::from_env())?;
//! service.start(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod receiver;
pub mod router;
pub mod service;
pub mod subscriber;

// Re-exports for public API
pub use adapters::{HttpBrokerClient, LoggingFulfillment};
pub use domain::config::ServiceConfig;
pub use domain::error::{ApiError, ServiceError, SubscribeError};
pub use domain::types::{BrokerAck, Event, SubscriptionRequest};
pub use domain::Menu;
pub use ports::{BrokerClient, Fulfillment};
pub use service::RestaurantService;
pub use subscriber::{Subscriber, SubscriptionStatus, SubscriptionTracker};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
