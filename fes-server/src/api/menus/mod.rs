//! Menu API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menus", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{circle_id}", get(handler::list).post(handler::create))
        .route(
            "/{circle_id}/{id}",
            patch(handler::update).delete(handler::archive),
        )
}
