//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`circles`] - 社团名录
//! - [`events`] - 活动报名与社团查找
//! - [`orders`] - 订单登记与后台状态
//! - [`menus`] - 菜单维护
//! - [`toppings`] - 配料维护
//! - [`sales`] - 销售报表

pub mod circles;
pub mod events;
pub mod health;
pub mod menus;
pub mod orders;
pub mod sales;
pub mod toppings;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
