//! Error codes
//!
//! Every code is declared once in the table below together with its HTTP
//! status and default message. Codes travel as bare numbers on the wire.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $code:literal, $status:ident, $message:literal; )*) => {
        /// Error code carried by [`AppError`](super::AppError) and the response envelope
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $code, )*
        }

        impl ErrorCode {
            /// Every declared code, in table order
            pub const ALL: &'static [ErrorCode] = &[$( ErrorCode::$name, )*];

            /// Default English message
            pub const fn message(&self) -> &'static str {
                match self {
                    $( ErrorCode::$name => $message, )*
                }
            }

            pub fn http_status(&self) -> StatusCode {
                match self {
                    $( ErrorCode::$name => StatusCode::$status, )*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $code => Ok(ErrorCode::$name), )*
                    _ => Err(InvalidErrorCode(value)),
                }
            }
        }
    };
}

error_codes! {
    // ---- 0xxx general ----
    Success = 0, OK, "Operation completed successfully";
    ValidationFailed = 2, BAD_REQUEST, "Validation failed";
    InvalidRequest = 5, BAD_REQUEST, "Invalid request";
    /// Unparsable timestamp or date bound
    InvalidFormat = 6, BAD_REQUEST, "Invalid format";
    RequiredField = 7, BAD_REQUEST, "Required field is missing";
    ValueOutOfRange = 8, BAD_REQUEST, "Value is out of range";

    // ---- 1xxx circle ----
    CircleIdRequired = 1001, BAD_REQUEST, "Circle id is required";
    CircleNotFound = 1002, NOT_FOUND, "Circle not found";

    // ---- 4xxx order ----
    OrderNotFound = 4001, NOT_FOUND, "Order not found";
    OrderEmpty = 4002, BAD_REQUEST, "Order has no items";
    /// A line with quantity 0
    OrderInvalidQuantity = 4004, BAD_REQUEST, "Order item quantity must be at least 1";

    // ---- 60xx menu items, 61xx toppings ----
    MenuItemNotFound = 6001, NOT_FOUND, "Menu item not found";
    /// Negative or above the accepted ceiling
    MenuItemInvalidPrice = 6002, BAD_REQUEST, "Menu item price is out of range";
    ToppingNotFound = 6101, NOT_FOUND, "Topping not found";
    ToppingInvalidPrice = 6102, BAD_REQUEST, "Topping price is out of range";

    // ---- 9xxx system ----
    DatabaseError = 9002, INTERNAL_SERVER_ERROR, "Database error";
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A number that is not a declared [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_u16() {
        for &code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(3), Err(InvalidErrorCode(3)));
        assert_eq!(ErrorCode::try_from(4003), Err(InvalidErrorCode(4003)));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ToppingNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CircleIdRequired.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CircleNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_success_is_success() {
        let successes: Vec<_> = ErrorCode::ALL.iter().filter(|c| c.is_success()).collect();
        assert_eq!(successes, vec![&ErrorCode::Success]);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderEmpty).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("6102").unwrap();
        assert_eq!(code, ErrorCode::ToppingInvalidPrice);
        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(ErrorCode::MenuItemInvalidPrice.to_string(), "6002");
    }
}
