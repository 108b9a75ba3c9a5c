//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus};
use validator::Validate;

use crate::core::ServerState;
use crate::floor::{CreateOrderInput, OrderLineInput};
use crate::utils::AppResult;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub table_id: Option<u64>,
    pub status: Option<String>,
}

/// GET /api/orders - 获取订单列表 (最新优先)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status: Option<OrderStatus> = query
        .status
        .as_deref()
        .map(|s| s.parse())
        .transpose()?;
    Ok(Json(state.orders.list(query.table_id, status)))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(id)?;
    Ok(Json(order))
}

/// One requested order line
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct OrderLineRequest {
    pub menu_item_id: u32,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

/// Create order request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub table_id: u64,
    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<OrderLineRequest>,
}

/// POST /api/orders - 创建订单
///
/// Validates the whole command before anything is persisted: an unknown
/// table or menu item rejects the create and no partial order survives.
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    req.validate()?;

    let input = CreateOrderInput {
        table_id: req.table_id,
        items: req
            .items
            .into_iter()
            .map(|line| OrderLineInput {
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                special_instructions: line.special_instructions,
            })
            .collect(),
    };

    let (order, events) = state.floor.create_order(input)?;
    for event in &events {
        state.hub.publish(event);
    }

    Ok((StatusCode::CREATED, Json(order)))
}

/// Set order status request
#[derive(Debug, Deserialize)]
pub struct SetOrderStatusRequest {
    pub status: String,
}

/// PUT /api/orders/:id/status - 变更订单状态
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(req): Json<SetOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    let status: OrderStatus = req.status.parse()?;
    let (order, events) = state.floor.set_order_status(id, status)?;

    // 状态变更已提交，事件在锁外广播
    for event in &events {
        state.hub.publish(event);
    }

    Ok(Json(order))
}
