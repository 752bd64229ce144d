//! Topping API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Topping, ToppingCreate, ToppingUpdate};

/// GET /api/toppings/{circle_id}
pub async fn list(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
) -> AppResult<Json<Vec<Topping>>> {
    let toppings = state.catalog.list_toppings(&circle_id)?;
    Ok(Json(toppings))
}

/// POST /api/toppings/{circle_id}
pub async fn create(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
    Json(payload): Json<ToppingCreate>,
) -> AppResult<Json<Topping>> {
    let topping = state.catalog.create_topping(&circle_id, payload)?;
    Ok(Json(topping))
}

/// PATCH /api/toppings/{circle_id}/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
    Json(payload): Json<ToppingUpdate>,
) -> AppResult<Json<Topping>> {
    let topping = state.catalog.update_topping(&circle_id, &id, payload)?;
    Ok(Json(topping))
}

/// DELETE /api/toppings/{circle_id}/{id} - 归档配料
pub async fn archive(
    State(state): State<ServerState>,
    Path((circle_id, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    state.catalog.archive_topping(&circle_id, &id)?;
    Ok(Json(true))
}
