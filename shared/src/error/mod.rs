//! Error handling shared by the store and the HTTP layer
//!
//! A failure is an [`AppError`]: a numeric [`ErrorCode`] plus an operator
//! facing message and optional key/value details. Handlers return
//! [`AppResult`]; axum turns the error into a JSON body of the shape
//! `{"code": 4001, "message": "...", "details": {...}}` with the status
//! declared next to the code.
//!
//! Codes are grouped by thousands, see [`ErrorCategory`].
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderEmpty).with_detail("circleId", "c1");
//! assert_eq!(err.http_status().as_u16(), 400);
//!
//! let body = ApiResponse::error(&err);
//! assert_eq!(body.code, 4002);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
