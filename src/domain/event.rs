use crate::error::PipelineError;
use crate::provider::CheckoutSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "checkout.session.completed")]
    CheckoutSessionCompleted,
    #[serde(other)]
    Other,
}

/// A provider callback, flattened from the signed envelope. Delivered
/// at-least-once; never persisted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub id: String,
    pub event_type: EventType,
    pub session_id: String,
    pub payment_status: String,
    pub customer_email: Option<String>,
    pub amount_total: i64,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    id: String,
    #[serde(rename = "type")]
    event_type: EventType,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: SessionObject,
}

#[derive(Debug, Deserialize)]
struct SessionObject {
    id: String,
    #[serde(default)]
    payment_status: String,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    amount_total: i64,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

impl PaymentEvent {
    pub fn from_raw(raw_body: &[u8]) -> Result<Self, PipelineError> {
        let envelope: EventEnvelope = serde_json::from_slice(raw_body)
            .map_err(|e| PipelineError::MalformedEvent(e.to_string()))?;
        Ok(Self {
            id: envelope.id,
            event_type: envelope.event_type,
            session_id: envelope.data.object.id,
            payment_status: envelope.data.object.payment_status,
            customer_email: envelope.data.object.customer_email,
            amount_total: envelope.data.object.amount_total,
            metadata: envelope.data.object.metadata,
        })
    }

    /// Rebuild an event from a session fetched directly from the provider,
    /// used by the manual retry path.
    pub fn from_session(session: CheckoutSession) -> Self {
        Self {
            id: format!("manual_{}", session.id),
            event_type: EventType::CheckoutSessionCompleted,
            session_id: session.id,
            payment_status: session.payment_status,
            customer_email: session.customer_email,
            amount_total: session.amount_total,
            metadata: session.metadata,
        }
    }
}
