use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    status: &'static str,
    version: &'static str,
    /// 报表分桶所用时区
    timezone: String,
    uptime_seconds: u64,
}

/// GET /health
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timezone: state.timezone().name().to_string(),
        uptime_seconds: state.uptime().as_secs(),
    })
}
