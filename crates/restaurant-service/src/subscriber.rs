//! One-shot broker registration.
//!
//! After a fixed warm-up delay the subscriber sends a single
//! `{"topic", "url"}` registration to the broker. There is no retry: a
//! failed registration is logged, recorded in the [`SubscriptionTracker`]
//! and the service keeps serving un-subscribed.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::adapters::HttpBrokerClient;
use crate::domain::{BrokerAck, ServiceConfig, SubscribeError, SubscriptionRequest};
use crate::ports::BrokerClient;

/// Outcome of the registration attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Warm-up delay or registration call still in progress
    Pending,
    /// Broker answered; `status` is its HTTP status code
    Subscribed { status: u16 },
    /// Registration never reached the broker
    Failed { reason: String },
}

/// Shared record of the registration outcome.
///
/// Written once by the subscriber task, read by the health endpoint.
#[derive(Debug, Clone)]
pub struct SubscriptionTracker {
    status: Arc<RwLock<SubscriptionStatus>>,
}

impl SubscriptionTracker {
    pub fn new() -> Self {
        Self {
            status: Arc::new(RwLock::new(SubscriptionStatus::Pending)),
        }
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status.read().clone()
    }

    fn record(&self, outcome: &Result<BrokerAck, SubscribeError>) {
        let next = match outcome {
            Ok(ack) => SubscriptionStatus::Subscribed { status: ack.status },
            Err(e) => SubscriptionStatus::Failed {
                reason: e.to_string(),
            },
        };
        *self.status.write() = next;
    }
}

impl Default for SubscriptionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends the registration for one topic to the broker.
pub struct Subscriber {
    request: SubscriptionRequest,
    client: Arc<dyn BrokerClient>,
    warmup_delay: Duration,
}

impl Subscriber {
    pub fn new(
        request: SubscriptionRequest,
        client: Arc<dyn BrokerClient>,
        warmup_delay: Duration,
    ) -> Self {
        Self {
            request,
            client,
            warmup_delay,
        }
    }

    /// Build a subscriber talking HTTP to the configured broker.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, SubscribeError> {
        let client = HttpBrokerClient::from_config(&config.broker)?;
        Ok(Self::new(
            SubscriptionRequest::new(&config.broker.topic, &config.broker.callback_url),
            Arc::new(client),
            config.broker.warmup_delay,
        ))
    }

    pub fn request(&self) -> &SubscriptionRequest {
        &self.request
    }

    /// Wait out the warm-up delay, then register exactly once.
    pub async fn subscribe(&self) -> Result<BrokerAck, SubscribeError> {
        if !self.warmup_delay.is_zero() {
            tokio::time::sleep(self.warmup_delay).await;
        }
        self.client.register(&self.request).await
    }

    /// Run [`Subscriber::subscribe`] on its own task, logging and recording
    /// the outcome. Never blocks the caller.
    pub fn spawn(self, tracker: SubscriptionTracker) -> JoinHandle<()> {
        tokio::spawn(async move {
            let outcome = self.subscribe().await;
            match &outcome {
                Ok(ack) if ack.is_success() => {
                    info!(topic = %self.request.topic, callback = %self.request.url, "Subscribed to broker");
                }
                Ok(ack) => {
                    warn!(
                        topic = %self.request.topic,
                        status = ack.status,
                        "Broker answered registration with non-success status"
                    );
                }
                Err(e) => {
                    error!(
                        topic = %self.request.topic,
                        error = %e,
                        "Failed to subscribe to broker; events will not be delivered"
                    );
                }
            }
            tracker.record(&outcome);
        })
    }
}
