//! 服务层 - HTTP 路由装配

pub mod app;

pub use app::{build_app, build_router};
