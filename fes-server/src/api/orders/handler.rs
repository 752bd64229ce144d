//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate, OrderUpdate};

/// GET /api/orders/{circle_id} - 获取未归档订单
pub async fn list(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_orders(&circle_id)?;
    Ok(Json(orders))
}

/// POST /api/orders/{circle_id} - 登记订单
pub async fn create(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create_order(&circle_id, payload)?;
    Ok(Json(order))
}

/// PATCH /api/orders/{circle_id}/{id} - 部分更新 (后台切换状态)
pub async fn update(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_order(&circle_id, &id, payload)?;
    Ok(Json(order))
}

/// DELETE /api/orders/{circle_id}/{id} - 归档订单
pub async fn archive(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    state.orders.archive_order(&circle_id, &id)?;
    Ok(Json(true))
}
