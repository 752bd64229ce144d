//! Shared types for FesOrder
//!
//! Common types used by the server and by any client that talks to it:
//! domain models, the unified error system, and the sales report
//! aggregation used by the dashboards.

pub mod error;
pub mod models;
pub mod report;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use report::{Granularity, SalesReport, aggregate};
