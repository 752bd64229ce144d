//! Event API 模块
//!
//! 收银端通过 (活动名, 社团名) 找到 circleId

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{event_name}", get(handler::list).post(handler::join))
}
