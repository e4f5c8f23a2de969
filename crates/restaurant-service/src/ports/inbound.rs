//! Inbound ports for the restaurant service.

use async_trait::async_trait;

use crate::domain::Event;

/// Processing step for accepted events ("begin fulfillment").
///
/// Cannot fail the inbound request: by the time it runs the event has
/// already been accepted.
#[async_trait]
pub trait Fulfillment: Send + Sync {
    async fn begin(&self, event: Event);
}
