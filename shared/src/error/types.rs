//! Error types and API response structures

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use crate::report::{CatalogKind, ReportError};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error returned by every handler
///
/// `code` picks the HTTP status, `message` is shown to the operator,
/// `details` carries field names and offending values.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the default message of `code`
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn circle_not_found(id: impl Into<String>) -> Self {
        Self::entity_not_found(ErrorCode::CircleNotFound, "Circle", id.into())
    }

    pub fn order_not_found(id: impl Into<String>) -> Self {
        Self::entity_not_found(ErrorCode::OrderNotFound, "Order", id.into())
    }

    pub fn menu_item_not_found(id: impl Into<String>) -> Self {
        Self::entity_not_found(ErrorCode::MenuItemNotFound, "Menu item", id.into())
    }

    pub fn topping_not_found(id: impl Into<String>) -> Self {
        Self::entity_not_found(ErrorCode::ToppingNotFound, "Topping", id.into())
    }

    fn entity_not_found(code: ErrorCode, label: &str, id: String) -> Self {
        Self::with_message(code, format!("{label} {id} not found")).with_detail("id", id)
    }

    /// Storage failure; the message is logged, not interpreted
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Report errors reaching a handler are client input problems
/// (a bad `from`/`to` bound, an explicit granularity check).
impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err {
            ReportError::MalformedTimestamp(raw) => {
                Self::with_message(ErrorCode::InvalidFormat, message).with_detail("value", raw)
            }
            ReportError::UnknownCatalogReference { kind, id } => {
                let code = match kind {
                    CatalogKind::MenuItem => ErrorCode::MenuItemNotFound,
                    CatalogKind::Topping => ErrorCode::ToppingNotFound,
                };
                Self::with_message(code, message).with_detail("id", id)
            }
            ReportError::UnrecognizedGranularity(raw) => {
                Self::with_message(ErrorCode::InvalidRequest, message).with_detail("range", raw)
            }
        }
    }
}

/// Error body returned by every failing handler
///
/// Successful handlers return their payload as plain JSON, so this
/// envelope only ever carries `{code, message, details}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
        }

        (status, axum::Json(ApiResponse::error(&self))).into_response()
    }
}
