//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    #[serde(default)]
    pub circle_id: String,
    pub menu_name: String,
    /// JPY, no subunits
    pub price: i64,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub description: String,
    /// Topping ids selectable for this item
    #[serde(default)]
    pub toppings: Vec<String>,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub sold_out: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub menu_name: String,
    pub price: i64,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub toppings: Option<Vec<String>>,
    pub additional_info: Option<String>,
    pub sold_out: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub menu_name: Option<String>,
    pub price: Option<i64>,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub toppings: Option<Vec<String>>,
    pub additional_info: Option<String>,
    pub sold_out: Option<bool>,
}
