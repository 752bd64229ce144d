//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活检查 + 版本 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "timezone": "Asia/Tokyo", "uptimeSeconds": 42 }
//! ```

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(handler::health))
}
