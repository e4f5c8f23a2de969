//! Wire types exchanged with the message broker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registration body sent to the broker's subscribe endpoint.
///
/// Encodes as `{"topic": "...", "url": "..."}`. Sending the same request twice
/// creates two independent registrations on the broker side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Exact-match topic name
    pub topic: String,
    /// Callback URL the broker pushes matching events to
    pub url: String,
}

impl SubscriptionRequest {
    pub fn new(topic: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            url: url.into(),
        }
    }
}

/// Transport-level acknowledgement of a registration.
///
/// The broker's response body is never consumed; only the status is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrokerAck {
    /// HTTP status code returned by the broker
    pub status: u16,
}

impl BrokerAck {
    /// Whether the broker answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Schema-less event pushed by the broker.
///
/// Any JSON object is accepted; no field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    /// Decode a request body into an event.
    ///
    /// Rejects malformed or truncated JSON, trailing data and every
    /// top-level value that is not an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
