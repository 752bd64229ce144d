//! Order Model

use serde::{Deserialize, Serialize};

/// Default state for a freshly registered order
pub const ORDER_STATE_PENDING: &str = "Pending";

/// One menu item plus quantity and selected toppings within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub topping_ids: Vec<String>,
    /// Free-text option labels chosen at the register (not used by reports)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl OrderLine {
    pub fn new(menu_item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            quantity,
            topping_ids: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn with_toppings<I, S>(mut self, topping_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topping_ids = topping_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Decode the text form of `orderItems` as persisted by the order store
pub fn decode_order_items(text: &str) -> Result<Vec<OrderLine>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
}

/// Encode order lines to the text form persisted by the order store
pub fn encode_order_items(lines: &[OrderLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Order entity (one customer transaction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub circle_id: String,
    /// Human-facing order number called out at the backyard
    #[serde(default)]
    pub order_id: String,
    pub order_items: Vec<OrderLine>,
    /// JPY, no subunits
    pub total_price: i64,
    pub people_count: u32,
    /// ISO 8601 placement time
    pub time: String,
    pub cashier: String,
    pub order_state: String,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub order_id: Option<String>,
    pub order_items: Vec<OrderLine>,
    pub total_price: i64,
    pub people_count: u32,
    /// Defaults to now when absent
    pub time: Option<String>,
    #[serde(default)]
    pub cashier: String,
    /// Defaults to [`ORDER_STATE_PENDING`]
    pub order_state: Option<String>,
}

/// Update order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_id: Option<String>,
    pub order_items: Option<Vec<OrderLine>>,
    pub total_price: Option<i64>,
    pub people_count: Option<u32>,
    pub time: Option<String>,
    pub cashier: Option<String>,
    pub order_state: Option<String>,
}
