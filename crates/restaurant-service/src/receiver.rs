//! Inbound event endpoint the broker pushes to.
//!
//! Each call is independent: decode one JSON object, hand it to the
//! [`Fulfillment`] step, answer `200` with an empty body. No state is kept
//! between calls, so concurrent and out-of-order pushes need no coordination.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
};
use tracing::{debug, warn};

use crate::domain::{ApiError, Event};
use crate::ports::Fulfillment;

/// State handed to the event handler
#[derive(Clone)]
pub struct ReceiverState {
    pub fulfillment: Arc<dyn Fulfillment>,
    pub max_event_size: usize,
}

impl ReceiverState {
    pub fn new(fulfillment: Arc<dyn Fulfillment>, max_event_size: usize) -> Self {
        Self {
            fulfillment,
            max_event_size,
        }
    }
}

/// `POST` handler for pushed events.
pub async fn handle_event(
    State(state): State<ReceiverState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body.map_err(|rejection| reject_body(rejection, state.max_event_size))?;
    let event = decode_event(&body)?;

    debug!(fields = event.len(), "Event accepted");
    state.fulfillment.begin(event).await;

    Ok(StatusCode::OK)
}

/// Fallback for every non-`POST` method on the event route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Decode a pushed body; nothing is processed when this fails.
pub fn decode_event(body: &[u8]) -> Result<Event, ApiError> {
    Event::from_slice(body).map_err(|e| {
        warn!(error = %e, body_len = body.len(), "Rejected malformed event");
        ApiError::from(e)
    })
}

fn reject_body(rejection: BytesRejection, limit: usize) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(limit, "Rejected oversized event");
        ApiError::payload_too_large(limit)
    } else {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}
