//! 事件中心 - 负责领域事件的扇出
//!
//! # 消息流
//!
//! ```text
//! Command ──▶ publish(FloorEvent) ──▶ server_tx ──┬──▶ TCP clients
//!                                                 └──▶ Memory subscribers
//! ```
//!
//! Every published event reaches every connected subscriber; the role a
//! client joined with is recorded for future filtering but does not
//! partition delivery today.

use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{BusMessage, FloorEvent, SubscriberRole};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::transport::MemoryTransport;

/// Capacity of the broadcast channel
const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Connected subscriber bookkeeping
#[derive(Debug, Clone)]
pub struct SubscriberInfo {
    pub role: SubscriberRole,
    pub client_name: Option<String>,
    /// Unix millis UTC
    pub connected_at: i64,
}

/// 事件中心
///
/// # 职责
///
/// - 事件发布 (publish)
/// - 订阅管理 (subscribe, register, deregister)
/// - 关闭信号 (shutdown_token)
#[derive(Debug, Clone)]
pub struct EventHub {
    /// 服务器到客户端的广播通道
    server_tx: broadcast::Sender<BusMessage>,
    /// 已连接的客户端 (Client ID -> 订阅信息)
    clients: Arc<DashMap<String, SubscriberInfo>>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (server_tx, _) = broadcast::channel(capacity);
        Self {
            server_tx,
            clients: Arc::new(DashMap::new()),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish a floor event to every subscriber.
    ///
    /// Fire-and-forget: the event is handed to every receiver queue before
    /// this returns; a lagging or vanished subscriber never propagates an
    /// error back to the publishing command.
    pub fn publish(&self, event: &FloorEvent) {
        let msg = match BusMessage::from_payload(event.event_type(), event) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("Failed to encode event {}: {}", event.event_type(), e);
                return;
            }
        };

        // Err means no live receivers, which is fine on an empty floor.
        let delivered = self.server_tx.send(msg).unwrap_or(0);
        tracing::debug!(
            event = %event.event_type(),
            receivers = delivered,
            "event published"
        );
    }

    /// Raw subscription to the broadcast channel
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.server_tx.subscribe()
    }

    /// In-process transport, subscribed from the instant of creation
    pub fn memory_transport(&self) -> MemoryTransport {
        MemoryTransport::new(&self.server_tx)
    }

    /// Record a connected client on its role channel
    pub fn register(&self, client_id: &str, role: SubscriberRole, client_name: Option<String>) {
        self.clients.insert(
            client_id.to_string(),
            SubscriberInfo {
                role,
                client_name,
                connected_at: chrono::Utc::now().timestamp_millis(),
            },
        );
        tracing::info!(client_id, role = %role, "client joined");
    }

    pub fn deregister(&self, client_id: &str) {
        if self.clients.remove(client_id).is_some() {
            tracing::info!(client_id, "client left");
        }
    }

    /// Total connected clients across all role channels
    pub fn connected_count(&self) -> usize {
        self.clients.len()
    }

    /// Connected clients on one role channel
    pub fn count_by_role(&self, role: SubscriberRole) -> usize {
        self.clients.iter().filter(|e| e.value().role == role).count()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Signal the TCP server and all connection tasks to stop
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::EventType;
    use shared::models::TableStatus;

    #[tokio::test]
    async fn publish_reaches_all_subscribers() {
        let hub = EventHub::new();
        let mut rx_a = hub.subscribe();
        let mut rx_b = hub.subscribe();

        hub.publish(&FloorEvent::TableStatusChanged {
            table_id: 2,
            status: TableStatus::Available,
        });

        for rx in [&mut rx_a, &mut rx_b] {
            let msg = rx.recv().await.unwrap();
            assert_eq!(msg.event_type, EventType::TableStatusChanged);
            let event: FloorEvent = msg.parse_payload().unwrap();
            assert!(matches!(
                event,
                FloorEvent::TableStatusChanged {
                    table_id: 2,
                    status: TableStatus::Available,
                }
            ));
        }
    }

    #[tokio::test]
    async fn memory_transport_receives_published_events() {
        use crate::gateway::transport::Transport;
        use shared::models::OrderStatus;

        let hub = EventHub::new();
        let transport = hub.memory_transport();

        hub.publish(&FloorEvent::OrderStatusChanged {
            order_id: 7,
            status: OrderStatus::Ready,
            timestamp: 0,
        });

        let msg = transport.read_message().await.unwrap();
        assert_eq!(msg.event_type, EventType::OrderStatusChanged);
        let event: FloorEvent = msg.parse_payload().unwrap();
        assert!(matches!(
            event,
            FloorEvent::OrderStatusChanged {
                order_id: 7,
                status: OrderStatus::Ready,
                ..
            }
        ));
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let hub = EventHub::new();
        hub.publish(&FloorEvent::TableStatusChanged {
            table_id: 1,
            status: TableStatus::Reserved,
        });
    }

    #[test]
    fn role_registration_is_tagging_only() {
        let hub = EventHub::new();
        hub.register("a", SubscriberRole::Kitchen, None);
        hub.register("b", SubscriberRole::Staff, Some("pos-1".into()));
        hub.register("c", SubscriberRole::Kitchen, None);

        assert_eq!(hub.connected_count(), 3);
        assert_eq!(hub.count_by_role(SubscriberRole::Kitchen), 2);
        assert_eq!(hub.count_by_role(SubscriberRole::Admin), 0);

        hub.deregister("a");
        assert_eq!(hub.connected_count(), 2);
    }
}
