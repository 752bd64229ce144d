//! Event API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{EventEntry, EventJoin};

/// 查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    /// 社团名 (精确匹配)
    pub circle_name: Option<String>,
}

/// GET /api/events/{event_name} - 参加活动的社团
pub async fn list(
    State(state): State<ServerState>,
    Path(event_name): Path<String>,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<Vec<EventEntry>>> {
    let entries = state
        .directory
        .event_circles(&event_name, query.circle_name.as_deref())?;
    Ok(Json(entries))
}

/// POST /api/events/{event_name} - 社团报名活动 (重复报名无副作用)
pub async fn join(
    State(state): State<ServerState>,
    Path(event_name): Path<String>,
    Json(payload): Json<EventJoin>,
) -> AppResult<Json<EventEntry>> {
    let entry = state.directory.join_event(&event_name, &payload.circle_id)?;
    Ok(Json(entry))
}
