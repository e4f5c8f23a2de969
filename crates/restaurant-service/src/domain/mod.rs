//! Domain types for the restaurant service.
//!
//! Configuration, error taxonomy, the subscription/event wire types and the static menu.

pub mod config;
pub mod error;
pub mod menu;
pub mod types;

// Re-exports for convenience
pub use config::{
    BrokerConfig, ConfigError, HttpConfig, LimitsConfig, ServiceConfig, TimeoutConfig, HEALTH_PATH,
    MENU_PATH,
};
pub use error::{ApiError, ServiceError, SubscribeError};
pub use menu::Menu;
pub use types::{BrokerAck, Event, SubscriptionRequest};
