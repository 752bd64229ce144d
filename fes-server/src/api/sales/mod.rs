//! Sales API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/sales/{circle_id}?range=&from=&to= | GET | 销售报表 |
//!
//! `range` 默认为 `daily`，原样交给聚合器；未知值只会让营收曲线为空。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::SalesQuery;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sales", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{circle_id}", get(handler::report))
}
