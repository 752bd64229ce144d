//! Sales report aggregation
//!
//! Turns a flat list of orders plus the menu/topping catalogs of a circle
//! into everything the sales dashboard renders:
//!
//! | Structure | Key | Value |
//! |-----------|-----|-------|
//! | revenue series | bucket key ([`Granularity`]) | sum of `totalPrice` |
//! | menu item sales | menu name | quantity, revenue at catalog price |
//! | topping usage | menu name → topping name | quantity with topping |
//! | hourly order counts | `HH:00` | number of orders |
//! | cashier ranking | cashier name | sum of `totalPrice`, top 5 |
//!
//! Aggregation never fails as a whole. A malformed order time, an unknown
//! catalog reference or an unknown granularity only removes that one
//! contribution; the skips are counted in [`ReportIssues`].
//!
//! # Example
//!
//! ```
//! use shared::models::{MenuItem, Order, OrderLine};
//! use shared::report::{aggregate, menu_catalog, ToppingCatalog};
//!
//! let menus = menu_catalog(vec![MenuItem {
//!     id: "m1".into(),
//!     circle_id: String::new(),
//!     menu_name: "Ramen".into(),
//!     price: 300,
//!     image_path: String::new(),
//!     description: String::new(),
//!     toppings: vec![],
//!     additional_info: String::new(),
//!     sold_out: false,
//! }]);
//! let orders = vec![Order {
//!     id: "o1".into(),
//!     circle_id: String::new(),
//!     order_id: "1".into(),
//!     order_items: vec![OrderLine::new("m1", 2)],
//!     total_price: 600,
//!     people_count: 1,
//!     time: "2024-08-01T10:15:00Z".into(),
//!     cashier: "Aoi".into(),
//!     order_state: "Pending".into(),
//! }];
//!
//! let report = aggregate(&orders, "daily", &menus, &ToppingCatalog::new());
//! assert_eq!(report.summary.total_sales, 600);
//! assert_eq!(report.revenue_series[0].label, "2024-08-01");
//! ```

mod aggregate;
mod bucket;
mod range;
mod types;

pub use aggregate::{
    CASHIER_RANKING_LIMIT, MenuCatalog, RECENT_ORDERS_LIMIT, SalesAggregator, ToppingCatalog,
    aggregate, menu_catalog, topping_catalog,
};
pub use bucket::{Granularity, bucket_key, hour_key, parse_order_time};
pub use range::TimeRange;
pub use types::{
    CashierSales, HourlyOrderCount, MenuItemSales, RecentOrder, ReportIssues, RevenuePoint,
    SalesReport, SalesSummary, ToppingCount, ToppingUsage,
};

use thiserror::Error;

/// Kind of catalog entry an order line points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    MenuItem,
    Topping,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MenuItem => write!(f, "menu item"),
            Self::Topping => write!(f, "topping"),
        }
    }
}

/// Per-item aggregation failures
///
/// These are produced while walking orders and immediately turned into a
/// skipped contribution. [`aggregate`] itself never returns them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("malformed timestamp '{0}'")]
    MalformedTimestamp(String),

    #[error("unknown {kind} reference '{id}'")]
    UnknownCatalogReference { kind: CatalogKind, id: String },

    #[error("unrecognized granularity '{0}'")]
    UnrecognizedGranularity(String),
}
