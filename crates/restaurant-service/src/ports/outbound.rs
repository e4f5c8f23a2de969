//! Outbound ports for the restaurant service.

use async_trait::async_trait;

use crate::domain::{BrokerAck, SubscribeError, SubscriptionRequest};

/// Registration channel to the message broker.
///
/// One call is one registration; the broker owns idempotency.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Send `request` to the broker's subscribe endpoint.
    ///
    /// Any HTTP response counts as delivered and is returned as a [`BrokerAck`],
    /// whatever its status.
    async fn register(&self, request: &SubscriptionRequest) -> Result<BrokerAck, SubscribeError>;
}
