//! Log-and-acknowledge fulfillment.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Event;
use crate::ports::Fulfillment;

/// Logs every accepted event and the start of food preparation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFulfillment;

#[async_trait]
impl Fulfillment for LoggingFulfillment {
    async fn begin(&self, event: Event) {
        let order_id = event.get("orderId").map(|v| v.to_string());
        let fields = event.len();
        let body = serde_json::Value::Object(event.into_inner());
        info!(
            order_id = order_id.as_deref().unwrap_or("-"),
            fields,
            event = %body,
            "Received event"
        );
        info!("Preparing food...");
    }
}
