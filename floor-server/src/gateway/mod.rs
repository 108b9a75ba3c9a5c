//! Realtime gateway: fan-out of floor events to connected clients.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               EventHub                   │
//! │  ┌───────────────────────────────────┐  │
//! │  │  broadcast::Sender<BusMessage>    │  │
//! │  └───────────────────────────────────┘  │
//! └────────────────┬────────────────────────┘
//!                  │
//!         ┌────────┴────────┐
//!         │ Transport Trait │
//!         └────────┬────────┘
//!                  │
//!         ┌────────┴────────┐
//!         ▼                 ▼
//!    TcpTransport     MemoryTransport
//!    (网络客户端)      (同进程/测试)
//! ```
//!
//! Commands publish into the hub after their store locks are released;
//! delivery to clients is fire-and-forget and never fails the command.

pub mod hub;
pub mod tcp_server;
pub mod transport;

pub use hub::{EventHub, SubscriberInfo};
pub use transport::{MemoryTransport, TcpTransport, Transport};
