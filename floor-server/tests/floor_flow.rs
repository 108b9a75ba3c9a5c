//! 楼面全流程集成测试
//!
//! 使用 ServerState::initialize 完整初始化，通过 TCP 网关验证事件扇出：
//! 下单 -> 占桌 -> 送达 -> 释放，以及并发下单的订单号约束。

use std::sync::Arc;

use floor_server::floor::{CreateOrderInput, OrderLineInput};
use floor_server::gateway::{TcpTransport, Transport};
use floor_server::{Config, ServerState};
use shared::message::{
    BusMessage, EventType, FloorEvent, HandshakePayload, JoinedPayload, PROTOCOL_VERSION,
    SubscriberRole,
};
use shared::models::{OrderStatus, TableStatus};

fn order_input(table_id: u64, menu_item_id: u32, quantity: u32) -> CreateOrderInput {
    CreateOrderInput {
        table_id,
        items: vec![OrderLineInput {
            menu_item_id,
            quantity,
            special_instructions: None,
        }],
    }
}

/// Spawn the gateway on an ephemeral port and return its address
async fn start_gateway(state: &ServerState) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hub = state.hub.clone();
    tokio::spawn(async move {
        let _ = hub.serve_connections(listener).await;
    });
    addr
}

/// Connect a client and complete the handshake on the given role channel
async fn connect_client(addr: &std::net::SocketAddr, role: SubscriberRole) -> TcpTransport {
    let transport = TcpTransport::connect(&addr.to_string()).await.unwrap();

    let handshake = HandshakePayload {
        version: PROTOCOL_VERSION,
        role,
        client_name: None,
    };
    transport
        .write_message(&BusMessage::from_payload(EventType::Handshake, &handshake).unwrap())
        .await
        .unwrap();

    let joined = transport.read_message().await.unwrap();
    assert_eq!(joined.event_type, EventType::Joined);
    let ack: JoinedPayload = joined.parse_payload().unwrap();
    assert!(ack.error.is_none());
    assert_eq!(ack.role, role);

    transport
}

async fn next_event(client: &TcpTransport) -> FloorEvent {
    let msg = tokio::time::timeout(std::time::Duration::from_secs(5), client.read_message())
        .await
        .expect("timed out waiting for event")
        .unwrap();
    msg.parse_payload().unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn order_lifecycle_reaches_every_subscriber() {
    let config = Config::with_overrides(0, 0);
    let state = ServerState::initialize(&config);
    let addr = start_gateway(&state).await;

    let kitchen = connect_client(&addr, SubscriberRole::Kitchen).await;
    let staff = connect_client(&addr, SubscriberRole::Staff).await;

    // Registration is visible once both handshakes completed
    assert_eq!(state.hub.connected_count(), 2);
    assert_eq!(state.hub.count_by_role(SubscriberRole::Kitchen), 1);

    // Table 1, two Phở Bò at 9.50 each
    let (order, events) = state.floor.create_order(order_input(1, 101, 2)).unwrap();
    assert_eq!(order.total_amount, 19.00);
    assert_eq!(order.status, OrderStatus::Pending);
    for event in &events {
        state.hub.publish(event);
    }

    let table = state.tables.get(1).unwrap();
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order_id, Some(order.id));

    // Every event reaches every client, regardless of role channel
    for client in [&kitchen, &staff] {
        match next_event(client).await {
            FloorEvent::NewOrder { order: received } => {
                assert_eq!(received.id, order.id);
                assert_eq!(received.total_amount, 19.00);
            }
            other => panic!("expected NewOrder, got {:?}", other),
        }
        match next_event(client).await {
            FloorEvent::TableStatusChanged { table_id, status } => {
                assert_eq!(table_id, 1);
                assert_eq!(status, TableStatus::Occupied);
            }
            other => panic!("expected TableStatusChanged, got {:?}", other),
        }
    }

    // Deliver: the table is released and the release is broadcast
    let (_, events) = state
        .floor
        .set_order_status(order.id, OrderStatus::Delivered)
        .unwrap();
    assert_eq!(events.len(), 2);
    for event in &events {
        state.hub.publish(event);
    }

    assert_eq!(state.tables.get(1).unwrap().status, TableStatus::Available);

    for client in [&kitchen, &staff] {
        match next_event(client).await {
            FloorEvent::OrderStatusChanged {
                order_id, status, ..
            } => {
                assert_eq!(order_id, order.id);
                assert_eq!(status, OrderStatus::Delivered);
            }
            other => panic!("expected OrderStatusChanged, got {:?}", other),
        }
        match next_event(client).await {
            FloorEvent::TableStatusChanged { table_id, status } => {
                assert_eq!(table_id, 1);
                assert_eq!(status, TableStatus::Available);
            }
            other => panic!("expected TableStatusChanged, got {:?}", other),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dead_subscriber_never_fails_a_command() {
    let config = Config::with_overrides(0, 0);
    let state = ServerState::initialize(&config);
    let addr = start_gateway(&state).await;

    let kitchen = connect_client(&addr, SubscriberRole::Kitchen).await;
    let doomed = connect_client(&addr, SubscriberRole::Staff).await;

    doomed.close().await.unwrap();
    drop(doomed);

    // Give the server a moment to reap the dead connection
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    // Publishing still succeeds and the surviving client still receives
    let (order, events) = state.floor.create_order(order_input(4, 401, 1)).unwrap();
    for event in &events {
        state.hub.publish(event);
    }

    match next_event(&kitchen).await {
        FloorEvent::NewOrder { order: received } => assert_eq!(received.id, order.id),
        other => panic!("expected NewOrder, got {:?}", other),
    }

    assert_eq!(state.hub.connected_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_yield_gapless_increasing_ids() {
    use rand::Rng;

    let config = Config::with_overrides(0, 0);
    let state = Arc::new(ServerState::initialize(&config));

    const ORDERS: usize = 32;
    const MENU_IDS: &[u32] = &[101, 102, 103, 201, 202, 301, 401, 404];

    let mut handles = Vec::new();
    for i in 0..ORDERS {
        let state = state.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let mut rng = rand::thread_rng();
            let table_id = (i % 8) as u64 + 1;
            let menu_item_id = MENU_IDS[rng.gen_range(0..MENU_IDS.len())];
            let quantity = rng.gen_range(1..=3);
            let (order, _) = state
                .floor
                .create_order(order_input(table_id, menu_item_id, quantity))
                .unwrap();
            order.id
        }));
    }

    let mut ids = Vec::with_capacity(ORDERS);
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();

    // Distinct, strictly increasing, no gaps under contention
    assert_eq!(ids, (1..=ORDERS as u64).collect::<Vec<_>>());

    // Every seeded table now carries its newest order as current
    for table in state.tables.list() {
        assert_eq!(table.status, TableStatus::Occupied);
        assert!(table.current_order_id.is_some());
    }
}

#[tokio::test]
async fn failed_creates_do_not_burn_order_ids() {
    let config = Config::with_overrides(0, 0);
    let state = ServerState::initialize(&config);

    let (first, _) = state.floor.create_order(order_input(1, 101, 1)).unwrap();

    // Unknown item, unknown table, empty items: all rejected outright
    assert!(state.floor.create_order(order_input(1, 999, 1)).is_err());
    assert!(state.floor.create_order(order_input(42, 101, 1)).is_err());
    assert!(
        state
            .floor
            .create_order(CreateOrderInput {
                table_id: 1,
                items: vec![],
            })
            .is_err()
    );

    let (second, _) = state.floor.create_order(order_input(2, 102, 1)).unwrap();
    assert_eq!(second.id, first.id + 1);

    // Listing is newest first with the id tiebreak
    let ids: Vec<u64> = state
        .orders
        .list(None, None)
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn version_mismatch_is_rejected_at_handshake() {
    let config = Config::with_overrides(0, 0);
    let state = ServerState::initialize(&config);
    let addr = start_gateway(&state).await;

    let transport = TcpTransport::connect(&addr.to_string()).await.unwrap();
    let handshake = HandshakePayload {
        version: PROTOCOL_VERSION + 1,
        role: SubscriberRole::Admin,
        client_name: None,
    };
    transport
        .write_message(&BusMessage::from_payload(EventType::Handshake, &handshake).unwrap())
        .await
        .unwrap();

    let joined = transport.read_message().await.unwrap();
    assert_eq!(joined.event_type, EventType::Joined);
    let ack: JoinedPayload = joined.parse_payload().unwrap();
    assert!(ack.error.is_some());

    assert_eq!(state.hub.connected_count(), 0);
}
