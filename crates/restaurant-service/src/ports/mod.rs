//! Ports (hexagonal boundaries) of the restaurant service.

pub mod inbound;
pub mod outbound;

pub use inbound::Fulfillment;
pub use outbound::BrokerClient;
