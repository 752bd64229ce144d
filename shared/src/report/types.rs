//! Report output types (aligned with the dashboard's TypeScript types)

use serde::{Deserialize, Serialize};

use super::Granularity;

/// One point of the revenue chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub label: String,
    pub value: i64,
}

/// Orders placed during one hour of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyOrderCount {
    /// `HH:00`
    pub hour: String,
    pub orders: u64,
}

/// Quantity and revenue of one menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemSales {
    pub menu_name: String,
    pub quantity: u64,
    /// Catalog price × quantity
    pub revenue: i64,
}

/// How often one topping was chosen on one menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingCount {
    pub topping_name: String,
    pub count: u64,
    /// `count / totalOrders * 100`
    pub percentage: f64,
}

/// Topping breakdown of one menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToppingUsage {
    pub menu_name: String,
    /// Units of this menu item sold
    pub total_orders: u64,
    pub toppings: Vec<ToppingCount>,
}

impl ToppingUsage {
    pub fn count(&self, topping_name: &str) -> Option<u64> {
        self.toppings
            .iter()
            .find(|t| t.topping_name == topping_name)
            .map(|t| t.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashierSales {
    pub cashier: String,
    pub total: i64,
}

/// Row of the dashboard's recent orders table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: String,
    pub order_id: String,
    pub time: String,
    pub total_price: i64,
    pub cashier: String,
    pub order_state: String,
}

/// Totals over every order handed to the aggregator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: i64,
    pub total_customers: u64,
    pub order_count: usize,
    /// 0 when there are no orders
    pub average_order_value: f64,
}

/// Contributions skipped while aggregating
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIssues {
    pub malformed_timestamps: u32,
    pub unknown_menu_items: u32,
    pub unknown_toppings: u32,
    /// Sums pinned at the `i64` bounds instead of overflowing
    pub clamped_amounts: u32,
    pub unrecognized_granularity: bool,
}

impl ReportIssues {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Full sales dashboard payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// `None` when the requested granularity was not recognized
    pub granularity: Option<Granularity>,
    pub summary: SalesSummary,
    /// Ascending by label
    pub revenue_series: Vec<RevenuePoint>,
    /// First-seen order
    pub menu_item_sales: Vec<MenuItemSales>,
    /// First-seen order
    pub topping_usage: Vec<ToppingUsage>,
    pub total_toppings: u64,
    /// Ascending by hour
    pub hourly_order_counts: Vec<HourlyOrderCount>,
    /// Descending by total, ties in first-seen order, at most 5
    pub cashier_ranking: Vec<CashierSales>,
    /// Newest first
    pub recent_orders: Vec<RecentOrder>,
    pub issues: ReportIssues,
}

impl SalesReport {
    pub fn menu_item(&self, menu_name: &str) -> Option<&MenuItemSales> {
        self.menu_item_sales
            .iter()
            .find(|m| m.menu_name == menu_name)
    }

    pub fn toppings_for(&self, menu_name: &str) -> Option<&ToppingUsage> {
        self.topping_usage.iter().find(|u| u.menu_name == menu_name)
    }

    pub fn revenue_at(&self, label: &str) -> Option<i64> {
        self.revenue_series
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.value)
    }
}
