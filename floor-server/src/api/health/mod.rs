//! 健康检查路由
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "tables": 8,
//!   "active_orders": 3,
//!   "connected_clients": 2
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    tables: usize,
    active_orders: usize,
    connected_clients: usize,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let active_orders = state
        .orders
        .list(None, None)
        .iter()
        .filter(|o| o.status.is_active())
        .count();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tables: state.tables.list().len(),
        active_orders,
        connected_clients: state.hub.connected_count(),
    })
}
