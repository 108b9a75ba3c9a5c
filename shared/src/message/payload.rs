//! Typed payloads carried by gateway messages.

use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderStatus, TableStatus};

/// Subscriber role channel.
///
/// Role membership is tagging for future client-side filtering; every
/// published event currently reaches every connected client regardless of
/// the channel it joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberRole {
    Staff,
    Kitchen,
    Admin,
    Customer,
}

impl std::fmt::Display for SubscriberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staff => write!(f, "staff"),
            Self::Kitchen => write!(f, "kitchen"),
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

/// Handshake payload (client -> server)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakePayload {
    /// Protocol version
    pub version: u16,
    /// Role channel to join
    pub role: SubscriberRole,
    /// Client name/identifier
    pub client_name: Option<String>,
}

/// Join acknowledgement (server -> client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedPayload {
    pub client_id: String,
    pub role: SubscriberRole,
    /// Set when the handshake was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Domain event fanned out to every connected client.
///
/// Payload schemas are fixed; clients key off the `event` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum FloorEvent {
    #[serde(rename_all = "camelCase")]
    TableStatusChanged {
        table_id: u64,
        status: TableStatus,
    },
    NewOrder {
        order: Order,
    },
    #[serde(rename_all = "camelCase")]
    OrderStatusChanged {
        order_id: u64,
        status: OrderStatus,
        /// Unix millis UTC at the moment the transition was applied
        timestamp: i64,
    },
}

impl FloorEvent {
    /// Wire tag for this event
    pub fn event_type(&self) -> super::EventType {
        match self {
            Self::TableStatusChanged { .. } => super::EventType::TableStatusChanged,
            Self::NewOrder { .. } => super::EventType::NewOrder,
            Self::OrderStatusChanged { .. } => super::EventType::OrderStatusChanged,
        }
    }
}
