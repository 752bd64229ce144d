//! Data models
//!
//! Shared between fes-server and the register/backyard/dashboard
//! frontends (via API). Wire format is camelCase JSON; all IDs are
//! opaque strings scoped to a circle.

pub mod circle;
pub mod menu_item;
pub mod order;
pub mod topping;

// Re-exports
pub use circle::*;
pub use menu_item::*;
pub use order::*;
pub use topping::*;
