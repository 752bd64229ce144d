use std::time::Instant;

use axum::body::Body;
use axum::{Router, middleware};
use http::{Request, Response};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// 访问日志：一行一个请求，target 固定为 `http_access`
async fn log_request(request: Request<Body>, next: middleware::Next) -> Response<Body> {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
    );
    response
}

/// All API routes, still waiting for their state
pub fn build_app() -> Router<ServerState> {
    use crate::api::{circles, events, health, menus, orders, sales, toppings};

    Router::new()
        .merge(health::router())
        .merge(circles::router())
        .merge(events::router())
        .merge(orders::router())
        .merge(menus::router())
        .merge(toppings::router())
        .merge(sales::router())
}

/// Router bound to `state` with the HTTP middleware stack
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
