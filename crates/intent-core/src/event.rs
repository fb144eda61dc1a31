//! # Webhook Event Model
//!
//! Inbound payment events posted by the provider. Events are ephemeral:
//! received, branched on, and discarded. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Webhook event types the service branches on.
///
/// Closed tagged union with an explicit catch-all arm: new provider event
/// types land in `Unknown` and are acknowledged without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentEventType {
    /// Payment completed successfully
    PaymentSucceeded,
    /// Payment attempt failed
    PaymentFailed,
    /// Any other event (acknowledged, no action)
    Unknown(String),
}

impl PaymentEventType {
    /// Map a provider event-type tag to our event model
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "payment_intent.succeeded" => PaymentEventType::PaymentSucceeded,
            "payment_intent.payment_failed" => PaymentEventType::PaymentFailed,
            other => PaymentEventType::Unknown(other.to_string()),
        }
    }
}

/// A parsed webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Event ID from the provider (absent in unverified local payloads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// Event type
    pub event_type: PaymentEventType,

    /// The `data.object` payload, opaque to this service
    pub object: serde_json::Map<String, serde_json::Value>,

    /// Provider-side creation time (unix seconds), when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl PaymentEvent {
    /// Payment intent ID from the event payload, if one is present
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.object.get("id").and_then(|v| v.as_str())
    }

    /// Amount from the event payload, if one is present
    pub fn amount(&self) -> Option<i64> {
        self.object.get("amount").and_then(|v| v.as_i64())
    }
}
