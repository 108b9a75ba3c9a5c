//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`menu`] - 菜单目录接口 (只读)
//! - [`tables`] - 桌台管理接口
//! - [`orders`] - 订单管理接口

use axum::Router;

use crate::core::ServerState;

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(orders::router())
}
