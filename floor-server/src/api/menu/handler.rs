//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{MenuCategory, MenuItem};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub menu_type: Option<String>,
}

/// GET /api/menu/categories - 获取菜单分类
pub async fn categories(
    State(state): State<ServerState>,
    Query(query): Query<CategoriesQuery>,
) -> AppResult<Json<Vec<MenuCategory>>> {
    Ok(Json(state.catalog.categories(query.menu_type.as_deref())))
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub category_id: Option<u32>,
    pub search: Option<String>,
    pub menu_type: Option<String>,
}

/// GET /api/menu/items - 获取菜单项 (可按分类/搜索词/菜单类型过滤)
pub async fn items(
    State(state): State<ServerState>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.items(
        query.category_id,
        query.search.as_deref(),
        query.menu_type.as_deref(),
    )))
}

/// GET /api/menu/items/:id - 获取单个菜单项
pub async fn item_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .catalog
        .item(id)
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}
