//! Order API 模块
//!
//! 收银台登记订单，后台切换 `orderState`，删除即归档。

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{circle_id}", get(handler::list).post(handler::create))
        .route(
            "/{circle_id}/{id}",
            patch(handler::update).delete(handler::archive),
        )
}
