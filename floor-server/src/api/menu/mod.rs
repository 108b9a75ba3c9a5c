//! Menu API 模块 (只读目录)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/categories", get(handler::categories))
        .route("/items", get(handler::items))
        .route("/items/{id}", get(handler::item_by_id))
}
