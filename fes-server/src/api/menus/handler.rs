//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

/// GET /api/menus/{circle_id} - 获取菜单 (按名称排序)
pub async fn list(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.catalog.list_menu_items(&circle_id)?;
    Ok(Json(items))
}

/// POST /api/menus/{circle_id} - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.catalog.create_menu_item(&circle_id, payload)?;
    Ok(Json(item))
}

/// PATCH /api/menus/{circle_id}/{id} - 更新菜单项 (含售罄切换)
pub async fn update(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.catalog.update_menu_item(&circle_id, &id, payload)?;
    Ok(Json(item))
}

/// DELETE /api/menus/{circle_id}/{id} - 归档菜单项 (报表仍可解析)
pub async fn archive(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    state.catalog.archive_menu_item(&circle_id, &id)?;
    Ok(Json(true))
}
