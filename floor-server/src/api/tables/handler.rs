//! Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Table, TableStatus};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    Ok(Json(state.tables.list()))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Table>> {
    let table = state.tables.get(id)?;
    Ok(Json(table))
}

/// Set table status request
#[derive(Debug, Deserialize)]
pub struct SetTableStatusRequest {
    pub status: String,
    pub order_id: Option<u64>,
}

/// PUT /api/tables/:id/status - 变更桌台状态
///
/// The status value is parsed at the boundary; anything outside
/// available/occupied/reserved is rejected before the registry is touched.
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(req): Json<SetTableStatusRequest>,
) -> AppResult<Json<Table>> {
    let status: TableStatus = req.status.parse()?;
    let (table, event) = state.floor.set_table_status(id, status, req.order_id)?;

    // 状态变更已提交，事件在锁外广播
    state.hub.publish(&event);

    Ok(Json(table))
}
