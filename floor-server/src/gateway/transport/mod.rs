//! Transport layer abstraction for the gateway.
//!
//! Wire format: 1-byte event tag, 4-byte little-endian payload length,
//! JSON payload.

use async_trait::async_trait;
use shared::message::{BusMessage, EventType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::utils::AppError;

pub mod memory;
pub mod tcp;

pub use memory::MemoryTransport;
pub use tcp::TcpTransport;

/// Upper bound on a single payload; a NewOrder event is a few KiB at most.
const MAX_PAYLOAD_LEN: usize = 1024 * 1024;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn read_message(&self) -> Result<BusMessage, AppError>;
    async fn write_message(&self, msg: &BusMessage) -> Result<(), AppError>;
    async fn close(&self) -> Result<(), AppError>;

    fn peer_addr(&self) -> Option<String> {
        None
    }
}

pub(crate) async fn read_from_stream<R: AsyncReadExt + Unpin>(
    reader: &mut R,
) -> Result<BusMessage, AppError> {
    // Event tag (1 byte)
    let mut tag_buf = [0u8; 1];
    reader
        .read_exact(&mut tag_buf)
        .await
        .map_err(|e| AppError::internal(format!("Read tag failed: {}", e)))?;

    let event_type =
        EventType::try_from(tag_buf[0]).map_err(|_| AppError::invalid("Invalid event tag"))?;

    // Payload length (4 bytes, LE)
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| AppError::internal(format!("Read len failed: {}", e)))?;

    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_PAYLOAD_LEN {
        return Err(AppError::invalid(format!("Payload too large: {} bytes", len)));
    }

    // Payload
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(|e| AppError::internal(format!("Read payload failed: {}", e)))?;

    Ok(BusMessage::new(event_type, payload))
}

pub(crate) async fn write_to_stream<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    msg: &BusMessage,
) -> Result<(), AppError> {
    let len = msg.payload.len();
    if len > MAX_PAYLOAD_LEN {
        return Err(AppError::invalid(format!("Payload too large: {} bytes", len)));
    }

    let mut frame = Vec::with_capacity(5 + len);
    frame.push(msg.event_type as u8);
    frame.extend_from_slice(&(len as u32).to_le_bytes());
    frame.extend_from_slice(&msg.payload);

    writer
        .write_all(&frame)
        .await
        .map_err(|e| AppError::internal(format!("Write failed: {}", e)))?;
    writer
        .flush()
        .await
        .map_err(|e| AppError::internal(format!("Flush failed: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::{HandshakePayload, PROTOCOL_VERSION, SubscriberRole};

    #[tokio::test]
    async fn frame_round_trip() {
        let payload = HandshakePayload {
            version: PROTOCOL_VERSION,
            role: SubscriberRole::Staff,
            client_name: None,
        };
        let msg = BusMessage::from_payload(EventType::Handshake, &payload).unwrap();

        let mut buf = Vec::new();
        write_to_stream(&mut buf, &msg).await.unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let decoded = read_from_stream(&mut cursor).await.unwrap();
        assert_eq!(decoded.event_type, EventType::Handshake);
        let decoded_payload: HandshakePayload = decoded.parse_payload().unwrap();
        assert_eq!(decoded_payload.version, PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn invalid_tag_is_rejected() {
        let mut cursor = std::io::Cursor::new(vec![0xFFu8, 0, 0, 0, 0]);
        assert!(read_from_stream(&mut cursor).await.is_err());
    }
}
