//! Topping Model

use serde::{Deserialize, Serialize};

/// Topping entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topping {
    pub id: String,
    #[serde(default)]
    pub circle_id: String,
    pub topping_name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sold_out: bool,
}

/// Create topping payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingCreate {
    pub topping_name: String,
    pub price: i64,
    pub description: Option<String>,
    pub sold_out: Option<bool>,
}

/// Update topping payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingUpdate {
    pub topping_name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub sold_out: Option<bool>,
}
