//! Circle API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Circle, CircleCreate, CircleUpdate};

/// GET /api/circles - 获取所有社团 (按名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Circle>>> {
    let circles = state.directory.list_circles()?;
    Ok(Json(circles))
}

/// GET /api/circles/{id} - 获取单个社团
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Circle>> {
    let circle = state.directory.get_circle(&id)?;
    Ok(Json(circle))
}

/// POST /api/circles - 创建社团
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CircleCreate>,
) -> AppResult<Json<Circle>> {
    let circle = state.directory.create_circle(payload)?;
    Ok(Json(circle))
}

/// PATCH /api/circles/{id} - 更新社团
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CircleUpdate>,
) -> AppResult<Json<Circle>> {
    let circle = state.directory.update_circle(&id, payload)?;
    Ok(Json(circle))
}

/// DELETE /api/circles/{id} - 归档社团 (同时退出所有活动)
pub async fn archive(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.directory.archive_circle(&id)?;
    Ok(Json(true))
}
