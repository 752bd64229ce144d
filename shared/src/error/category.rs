use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain a code belongs to, derived from its thousands digit
///
/// Gaps between the declared ranges (2xxx, 3xxx, 5xxx, 7xxx, 8xxx) are
/// folded into the range below them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx
    Circle,
    /// 4xxx
    Order,
    /// 6xxx, menu items and toppings
    Catalog,
    /// 9xxx, logged at error level
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1..=3 => Self::Circle,
            4 | 5 => Self::Order,
            6..=8 => Self::Catalog,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
