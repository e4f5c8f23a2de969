//! Broker registration over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::{BrokerAck, BrokerConfig, SubscribeError, SubscriptionRequest};
use crate::ports::BrokerClient;

/// `BrokerClient` that POSTs the registration as JSON.
pub struct HttpBrokerClient {
    client: Client,
    subscribe_url: String,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl HttpBrokerClient {
    /// Create a client with explicit total and connect deadlines.
    pub fn new(
        subscribe_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, SubscribeError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| SubscribeError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            subscribe_url: subscribe_url.into(),
            request_timeout,
            connect_timeout,
        })
    }

    pub fn from_config(config: &BrokerConfig) -> Result<Self, SubscribeError> {
        Self::new(
            config.subscribe_url.clone(),
            config.request_timeout,
            config.connect_timeout,
        )
    }

    pub fn subscribe_url(&self) -> &str {
        &self.subscribe_url
    }

    /// Deadline that expired: connect timeouts report the connect deadline.
    fn deadline(&self, connecting: bool) -> Duration {
        if connecting {
            self.connect_timeout
        } else {
            self.request_timeout
        }
    }

    fn classify(&self, e: reqwest::Error) -> SubscribeError {
        if e.is_timeout() {
            SubscribeError::Timeout {
                timeout_ms: self.deadline(e.is_connect()).as_millis() as u64,
            }
        } else if e.is_connect() {
            SubscribeError::Connection {
                url: self.subscribe_url.clone(),
                reason: e.to_string(),
            }
        } else {
            SubscribeError::Http(e)
        }
    }
}

#[async_trait]
impl BrokerClient for HttpBrokerClient {
    async fn register(&self, request: &SubscriptionRequest) -> Result<BrokerAck, SubscribeError> {
        debug!(url = %self.subscribe_url, topic = %request.topic, "Sending registration");

        let response = self
            .client
            .post(&self.subscribe_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        Ok(BrokerAck {
            status: response.status().as_u16(),
        })
    }
}
