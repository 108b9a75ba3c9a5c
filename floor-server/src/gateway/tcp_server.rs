//! TCP 服务器实现
//!
//! 负责处理 TCP 客户端连接，包括：
//! - 监听连接
//! - 协议握手 (版本校验 + 角色加入)
//! - 事件转发
//! - 断开清理

use std::net::SocketAddr;
use std::sync::Arc;

use shared::message::{
    BusMessage, EventType, HandshakePayload, JoinedPayload, PROTOCOL_VERSION,
};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::hub::EventHub;
use super::transport::{TcpTransport, Transport};
use crate::utils::AppError;

impl EventHub {
    /// Start the gateway TCP server.
    ///
    /// 1. Accepts connections
    /// 2. Performs the protocol handshake (version check, role join)
    /// 3. Forwards published events to every connected client
    /// 4. Gracefully shuts down on cancellation signal
    pub async fn start_tcp_server(&self, listen_addr: &str) -> Result<(), AppError> {
        let listener = TcpListener::bind(listen_addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", listen_addr, e)))?;

        tracing::info!("Gateway TCP server listening on {}", listen_addr);
        self.serve_connections(listener).await
    }

    /// Accept clients on an already-bound listener. Useful when the caller
    /// needs the ephemeral port before the server starts.
    pub async fn serve_connections(&self, listener: TcpListener) -> Result<(), AppError> {
        loop {
            tokio::select! {
                _ = self.shutdown_token().cancelled() => {
                    tracing::info!("Gateway TCP server shutting down");
                    break;
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            tracing::debug!("Client connected: {}", addr);
                            self.spawn_client_handler(stream, addr);
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn spawn_client_handler(&self, stream: TcpStream, addr: SocketAddr) {
        let hub = self.clone();
        let rx = self.subscribe();
        let shutdown_token = self.shutdown_token().clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client_connection(hub, stream, addr, rx, shutdown_token).await {
                tracing::debug!("Client {} handler finished: {}", addr, e);
            }
        });
    }
}

/// Handle a single client connection
async fn handle_client_connection(
    hub: EventHub,
    stream: TcpStream,
    addr: SocketAddr,
    rx: broadcast::Receiver<BusMessage>,
    shutdown_token: CancellationToken,
) -> Result<(), AppError> {
    let transport: Arc<dyn Transport> = Arc::new(TcpTransport::from_stream(stream));

    let (client_id, payload) = perform_handshake(&transport, addr).await?;

    // Register before the ack so the client is observable the moment it
    // learns it joined.
    hub.register(&client_id, payload.role, payload.client_name.clone());
    send_joined(
        &transport,
        JoinedPayload {
            client_id: client_id.clone(),
            role: payload.role,
            error: None,
        },
    )
    .await;

    // 断开检测 token: 读循环检测到断开后，通知转发任务停止
    let disconnect_token = CancellationToken::new();

    let forward_handle = spawn_event_forwarder(
        transport.clone(),
        rx,
        shutdown_token.clone(),
        disconnect_token.clone(),
        client_id.clone(),
    );

    // Drain inbound frames until the client hangs up. Clients are
    // receive-only after the handshake, so anything read here is ignored.
    loop {
        tokio::select! {
            _ = shutdown_token.cancelled() => break,
            result = transport.read_message() => {
                match result {
                    Ok(msg) => {
                        tracing::debug!(
                            client_id = %client_id,
                            event = %msg.event_type,
                            "ignoring unexpected client frame"
                        );
                    }
                    Err(_) => break,
                }
            }
        }
    }

    // Cleanup
    disconnect_token.cancel();
    let _ = forward_handle.await;
    let _ = transport.close().await;
    hub.deregister(&client_id);

    Ok(())
}

/// Perform protocol handshake with client, returning its id and the
/// validated handshake payload
async fn perform_handshake(
    transport: &Arc<dyn Transport>,
    addr: SocketAddr,
) -> Result<(String, HandshakePayload), AppError> {
    let msg = transport.read_message().await.map_err(|e| {
        tracing::warn!("Client {} handshake error: {}", addr, e);
        e
    })?;

    if msg.event_type != EventType::Handshake {
        tracing::warn!(
            "Client {} failed to handshake: expected Handshake, got {}",
            addr,
            msg.event_type
        );
        return Err(AppError::invalid("Expected Handshake message"));
    }

    let payload: HandshakePayload = msg.parse_payload().map_err(|e| {
        tracing::warn!("Client {} sent invalid handshake payload: {}", addr, e);
        AppError::invalid(format!("Invalid handshake payload: {}", e))
    })?;

    let client_id = Uuid::new_v4().to_string();

    if payload.version != PROTOCOL_VERSION {
        tracing::warn!(
            "Client {} protocol version mismatch: expected {}, got {}",
            addr,
            PROTOCOL_VERSION,
            payload.version
        );
        send_joined(
            transport,
            JoinedPayload {
                client_id,
                role: payload.role,
                error: Some(format!(
                    "Protocol version mismatch: server={}, client={}",
                    PROTOCOL_VERSION, payload.version
                )),
            },
        )
        .await;
        return Err(AppError::invalid("Protocol version mismatch"));
    }

    tracing::debug!(
        "Client {} handshake success (v{}, role: {}, id: {})",
        addr,
        payload.version,
        payload.role,
        client_id
    );

    Ok((client_id, payload))
}

async fn send_joined(transport: &Arc<dyn Transport>, payload: JoinedPayload) {
    match BusMessage::from_payload(EventType::Joined, &payload) {
        Ok(msg) => {
            if let Err(e) = transport.write_message(&msg).await {
                tracing::warn!("Failed to send join ack: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to encode join ack: {}", e),
    }
}

/// Forward published events into the client socket until shutdown,
/// disconnect, or a write failure.
fn spawn_event_forwarder(
    transport: Arc<dyn Transport>,
    mut rx: broadcast::Receiver<BusMessage>,
    shutdown_token: CancellationToken,
    disconnect_token: CancellationToken,
    client_id: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_token.cancelled() => break,
                _ = disconnect_token.cancelled() => break,
                result = rx.recv() => {
                    match result {
                        Ok(msg) => {
                            if let Err(e) = transport.write_message(&msg).await {
                                tracing::debug!(
                                    client_id = %client_id,
                                    "forward failed, dropping client: {}",
                                    e
                                );
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // Best-effort delivery: a slow client just loses
                            // the skipped events.
                            tracing::warn!(
                                client_id = %client_id,
                                skipped,
                                "client lagging, events dropped"
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }
    })
}
