//! Adapters implementing the service ports.

pub mod broker_http;
pub mod fulfillment;

pub use broker_http::HttpBrokerClient;
pub use fulfillment::LoggingFulfillment;
