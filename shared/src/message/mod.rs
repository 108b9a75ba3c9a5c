//! Gateway message types.
//!
//! Shared between the server and connected clients, for both in-process
//! (memory) and network (TCP) delivery. The wire format is a 1-byte event
//! tag, a 4-byte little-endian payload length, and a JSON payload.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Protocol version, checked during handshake
pub const PROTOCOL_VERSION: u16 = 1;

/// Gateway event types (wire tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Client handshake (client -> server)
    Handshake = 0,
    /// Join acknowledgement (server -> client)
    Joined = 1,
    /// Table status change notification
    TableStatusChanged = 2,
    /// New order notification
    NewOrder = 3,
    /// Order status change notification
    OrderStatusChanged = 4,
}

impl TryFrom<u8> for EventType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::Handshake),
            1 => Ok(EventType::Joined),
            2 => Ok(EventType::TableStatusChanged),
            3 => Ok(EventType::NewOrder),
            4 => Ok(EventType::OrderStatusChanged),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Handshake => write!(f, "handshake"),
            EventType::Joined => write!(f, "joined"),
            EventType::TableStatusChanged => write!(f, "tableStatusChanged"),
            EventType::NewOrder => write!(f, "newOrder"),
            EventType::OrderStatusChanged => write!(f, "orderStatusChanged"),
        }
    }
}

/// Framed gateway message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            payload,
        }
    }

    /// Build a message from a typed payload
    pub fn from_payload<T: Serialize>(
        event_type: EventType,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event_type, serde_json::to_vec(payload)?))
    }

    /// Decode the payload into a typed value
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tag_round_trip() {
        for tag in 0u8..=4 {
            let et = EventType::try_from(tag).unwrap();
            assert_eq!(et as u8, tag);
        }
        assert!(EventType::try_from(9).is_err());
    }

    #[test]
    fn payload_round_trip() {
        let payload = HandshakePayload {
            version: PROTOCOL_VERSION,
            role: SubscriberRole::Kitchen,
            client_name: Some("kds-1".into()),
        };
        let msg = BusMessage::from_payload(EventType::Handshake, &payload).unwrap();
        let decoded: HandshakePayload = msg.parse_payload().unwrap();
        assert_eq!(decoded.version, PROTOCOL_VERSION);
        assert_eq!(decoded.role, SubscriberRole::Kitchen);
    }
}
