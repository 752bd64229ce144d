//! Order walk producing the [`SalesReport`]

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::DateTime;
use chrono_tz::Tz;

use super::types::{
    CashierSales, HourlyOrderCount, MenuItemSales, RecentOrder, ReportIssues, RevenuePoint,
    SalesReport, SalesSummary, ToppingCount, ToppingUsage,
};
use super::{CatalogKind, Granularity, ReportError, bucket_key, hour_key, parse_order_time};
use crate::models::{MenuItem, Order, OrderLine, Topping};

/// Cashiers kept in the ranking
pub const CASHIER_RANKING_LIMIT: usize = 5;

/// Rows in the recent orders table
pub const RECENT_ORDERS_LIMIT: usize = 10;

/// Menu items by id
pub type MenuCatalog = HashMap<String, MenuItem>;

/// Toppings by id
pub type ToppingCatalog = HashMap<String, Topping>;

pub fn menu_catalog(items: impl IntoIterator<Item = MenuItem>) -> MenuCatalog {
    items.into_iter().map(|m| (m.id.clone(), m)).collect()
}

pub fn topping_catalog(items: impl IntoIterator<Item = Topping>) -> ToppingCatalog {
    items.into_iter().map(|t| (t.id.clone(), t)).collect()
}

/// Aggregate `orders` in UTC
///
/// `granularity` is taken verbatim; an unknown value leaves the revenue
/// series empty and sets `issues.unrecognized_granularity`.
pub fn aggregate(
    orders: &[Order],
    granularity: &str,
    menus: &MenuCatalog,
    toppings: &ToppingCatalog,
) -> SalesReport {
    SalesAggregator::new(menus, toppings).aggregate(orders, granularity)
}

/// Catalog-bound aggregator
///
/// Pure and synchronous. The same input always yields the same report.
#[derive(Debug, Clone, Copy)]
pub struct SalesAggregator<'a> {
    menus: &'a MenuCatalog,
    toppings: &'a ToppingCatalog,
    tz: Tz,
}

impl<'a> SalesAggregator<'a> {
    pub fn new(menus: &'a MenuCatalog, toppings: &'a ToppingCatalog) -> Self {
        Self {
            menus,
            toppings,
            tz: Tz::UTC,
        }
    }

    /// Zone used for bucket keys and the hour histogram
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn aggregate<'o>(
        &self,
        orders: impl IntoIterator<Item = &'o Order>,
        granularity: &str,
    ) -> SalesReport {
        match granularity.parse::<Granularity>() {
            Ok(granularity) => self.aggregate_with(orders, Some(granularity)),
            Err(e) => {
                tracing::warn!(error = %e, "Revenue series left empty");
                let mut report = self.aggregate_with(orders, None);
                report.issues.unrecognized_granularity = true;
                report
            }
        }
    }

    /// Aggregate with an already parsed granularity
    ///
    /// `None` skips the revenue series and nothing else.
    pub fn aggregate_with<'o>(
        &self,
        orders: impl IntoIterator<Item = &'o Order>,
        granularity: Option<Granularity>,
    ) -> SalesReport {
        let mut acc = Accumulator::default();
        for order in orders {
            self.accumulate(&mut acc, order, granularity);
        }
        acc.finish(granularity)
    }

    fn accumulate(&self, acc: &mut Accumulator, order: &Order, granularity: Option<Granularity>) {
        add_amount(&mut acc.total_sales, order.total_price, &mut acc.issues);
        acc.total_customers += u64::from(order.people_count);
        acc.order_count += 1;

        let time = match parse_order_time(&order.time, self.tz) {
            Ok(time) => Some(time),
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Order left out of time series");
                acc.issues.malformed_timestamps += 1;
                None
            }
        };

        if let Some(time) = &time {
            if let Some(granularity) = granularity {
                let bucket = acc.revenue.entry(bucket_key(time, granularity)).or_insert(0);
                add_amount(bucket, order.total_price, &mut acc.issues);
            }
            *acc.hourly.entry(hour_key(time)).or_insert(0) += 1;
        }

        for line in &order.order_items {
            match self.resolve_menu_item(line) {
                Ok(menu_item) => self.accumulate_line(acc, order, line, menu_item),
                Err(e) => {
                    tracing::debug!(order_id = %order.id, error = %e, "Order line skipped");
                    acc.issues.unknown_menu_items += 1;
                }
            }
        }

        acc.add_cashier(&order.cashier, order.total_price);
        acc.recent.push((time, recent_row(order)));
    }

    fn accumulate_line(
        &self,
        acc: &mut Accumulator,
        order: &Order,
        line: &OrderLine,
        menu_item: &MenuItem,
    ) {
        let quantity = u64::from(line.quantity);
        let revenue = match menu_item.price.checked_mul(i64::from(line.quantity)) {
            Some(revenue) => revenue,
            None => {
                acc.issues.clamped_amounts += 1;
                menu_item.price.saturating_mul(i64::from(line.quantity))
            }
        };
        acc.add_menu_item(menu_item, quantity, revenue);

        let usage = acc.usage_for(&menu_item.menu_name);
        acc.topping_usage[usage].total_orders += quantity;

        for topping_id in &line.topping_ids {
            match self.resolve_topping(topping_id) {
                Ok(topping) => {
                    acc.add_topping(usage, &topping.topping_name, quantity);
                    acc.total_toppings += quantity;
                }
                Err(e) => {
                    tracing::debug!(order_id = %order.id, error = %e, "Topping skipped");
                    acc.issues.unknown_toppings += 1;
                }
            }
        }
    }

    fn resolve_menu_item(&self, line: &OrderLine) -> Result<&'a MenuItem, ReportError> {
        self.menus
            .get(&line.menu_item_id)
            .ok_or_else(|| ReportError::UnknownCatalogReference {
                kind: CatalogKind::MenuItem,
                id: line.menu_item_id.clone(),
            })
    }

    fn resolve_topping(&self, id: &str) -> Result<&'a Topping, ReportError> {
        self.toppings
            .get(id)
            .ok_or_else(|| ReportError::UnknownCatalogReference {
                kind: CatalogKind::Topping,
                id: id.to_string(),
            })
    }
}

/// `sum += amount`, pinned at the `i64` bounds
fn add_amount(sum: &mut i64, amount: i64, issues: &mut ReportIssues) {
    match sum.checked_add(amount) {
        Some(total) => *sum = total,
        None => {
            tracing::warn!(sum = *sum, amount, "Amount clamped");
            *sum = sum.saturating_add(amount);
            issues.clamped_amounts += 1;
        }
    }
}

fn recent_row(order: &Order) -> RecentOrder {
    RecentOrder {
        id: order.id.clone(),
        order_id: order.order_id.clone(),
        time: order.time.clone(),
        total_price: order.total_price,
        cashier: order.cashier.clone(),
        order_state: order.order_state.clone(),
    }
}

/// Newest first, unparsable times last
fn newest_first(a: &Option<DateTime<Tz>>, b: &Option<DateTime<Tz>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Default)]
struct Accumulator {
    total_sales: i64,
    total_customers: u64,
    order_count: usize,

    revenue: BTreeMap<String, i64>,
    hourly: BTreeMap<String, u64>,

    // Insertion-ordered maps: Vec for order, HashMap for lookup
    menu_sales: Vec<MenuItemSales>,
    menu_index: HashMap<String, usize>,
    topping_usage: Vec<ToppingUsage>,
    usage_index: HashMap<String, usize>,
    cashiers: Vec<CashierSales>,
    cashier_index: HashMap<String, usize>,

    total_toppings: u64,
    recent: Vec<(Option<DateTime<Tz>>, RecentOrder)>,
    issues: ReportIssues,
}

impl Accumulator {
    fn add_menu_item(&mut self, menu_item: &MenuItem, quantity: u64, revenue: i64) {
        let idx = match self.menu_index.get(&menu_item.menu_name) {
            Some(&idx) => idx,
            None => {
                self.menu_sales.push(MenuItemSales {
                    menu_name: menu_item.menu_name.clone(),
                    quantity: 0,
                    revenue: 0,
                });
                self.menu_index
                    .insert(menu_item.menu_name.clone(), self.menu_sales.len() - 1);
                self.menu_sales.len() - 1
            }
        };
        let entry = &mut self.menu_sales[idx];
        entry.quantity = entry.quantity.saturating_add(quantity);
        add_amount(&mut entry.revenue, revenue, &mut self.issues);
    }

    fn usage_for(&mut self, menu_name: &str) -> usize {
        if let Some(&idx) = self.usage_index.get(menu_name) {
            return idx;
        }
        self.topping_usage.push(ToppingUsage {
            menu_name: menu_name.to_string(),
            total_orders: 0,
            toppings: Vec::new(),
        });
        let idx = self.topping_usage.len() - 1;
        self.usage_index.insert(menu_name.to_string(), idx);
        idx
    }

    fn add_topping(&mut self, usage: usize, topping_name: &str, quantity: u64) {
        let toppings = &mut self.topping_usage[usage].toppings;
        match toppings.iter_mut().find(|t| t.topping_name == topping_name) {
            Some(t) => t.count += quantity,
            None => toppings.push(ToppingCount {
                topping_name: topping_name.to_string(),
                count: quantity,
                percentage: 0.0,
            }),
        }
    }

    fn add_cashier(&mut self, cashier: &str, amount: i64) {
        match self.cashier_index.get(cashier) {
            Some(&idx) => add_amount(&mut self.cashiers[idx].total, amount, &mut self.issues),
            None => {
                self.cashier_index
                    .insert(cashier.to_string(), self.cashiers.len());
                self.cashiers.push(CashierSales {
                    cashier: cashier.to_string(),
                    total: amount,
                });
            }
        }
    }

    fn finish(mut self, granularity: Option<Granularity>) -> SalesReport {
        for usage in &mut self.topping_usage {
            let total = usage.total_orders;
            for topping in &mut usage.toppings {
                topping.percentage = if total == 0 {
                    0.0
                } else {
                    topping.count as f64 / total as f64 * 100.0
                };
            }
        }

        // sort_by is stable: ties keep first-seen order
        self.cashiers.sort_by(|a, b| b.total.cmp(&a.total));
        self.cashiers.truncate(CASHIER_RANKING_LIMIT);

        self.recent.sort_by(|(a, _), (b, _)| newest_first(a, b));
        let recent_orders = self
            .recent
            .into_iter()
            .take(RECENT_ORDERS_LIMIT)
            .map(|(_, row)| row)
            .collect();

        let average_order_value = if self.order_count == 0 {
            0.0
        } else {
            self.total_sales as f64 / self.order_count as f64
        };

        SalesReport {
            granularity,
            summary: SalesSummary {
                total_sales: self.total_sales,
                total_customers: self.total_customers,
                order_count: self.order_count,
                average_order_value,
            },
            revenue_series: self
                .revenue
                .into_iter()
                .map(|(label, value)| RevenuePoint { label, value })
                .collect(),
            menu_item_sales: self.menu_sales,
            topping_usage: self.topping_usage,
            total_toppings: self.total_toppings,
            hourly_order_counts: self
                .hourly
                .into_iter()
                .map(|(hour, orders)| HourlyOrderCount { hour, orders })
                .collect(),
            cashier_ranking: self.cashiers,
            recent_orders,
            issues: self.issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: &str, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            circle_id: "c1".to_string(),
            menu_name: name.to_string(),
            price,
            image_path: String::new(),
            description: String::new(),
            toppings: vec![],
            additional_info: String::new(),
            sold_out: false,
        }
    }

    fn topping(id: &str, name: &str, price: i64) -> Topping {
        Topping {
            id: id.to_string(),
            circle_id: "c1".to_string(),
            topping_name: name.to_string(),
            price,
            description: String::new(),
            sold_out: false,
        }
    }

    fn order(id: &str, time: &str, total: i64, cashier: &str, lines: Vec<OrderLine>) -> Order {
        Order {
            id: id.to_string(),
            circle_id: "c1".to_string(),
            order_id: id.to_string(),
            order_items: lines,
            total_price: total,
            people_count: 1,
            time: time.to_string(),
            cashier: cashier.to_string(),
            order_state: "Pending".to_string(),
        }
    }

    fn catalogs() -> (MenuCatalog, ToppingCatalog) {
        (
            menu_catalog(vec![menu("m1", "Ramen", 300), menu("m2", "Gyoza", 200)]),
            topping_catalog(vec![topping("t1", "Egg", 100), topping("t2", "Nori", 50)]),
        )
    }

    #[test]
    fn test_empty_input() {
        let (menus, toppings) = catalogs();
        let report = aggregate(&[], "daily", &menus, &toppings);

        assert_eq!(report.summary, SalesSummary::default());
        assert_eq!(report.summary.average_order_value, 0.0);
        assert!(report.revenue_series.is_empty());
        assert!(report.menu_item_sales.is_empty());
        assert!(report.topping_usage.is_empty());
        assert!(report.hourly_order_counts.is_empty());
        assert!(report.cashier_ranking.is_empty());
        assert!(report.recent_orders.is_empty());
        assert_eq!(report.total_toppings, 0);
        assert!(report.issues.is_clean());
    }

    #[test]
    fn test_single_order_with_topping() {
        let (menus, toppings) = catalogs();
        let mut o = order(
            "o1",
            "2024-08-01T10:15:00Z",
            1000,
            "Aoi",
            vec![OrderLine::new("m1", 3).with_toppings(["t1"])],
        );
        o.people_count = 2;

        let report = aggregate(&[o], "daily", &menus, &toppings);

        let ramen = report.menu_item("Ramen").unwrap();
        assert_eq!((ramen.quantity, ramen.revenue), (3, 900));
        let usage = report.toppings_for("Ramen").unwrap();
        assert_eq!(usage.count("Egg"), Some(3));
        assert_eq!(usage.total_orders, 3);
        assert_eq!(report.total_toppings, 3);
        assert_eq!(report.summary.total_sales, 1000);
        assert_eq!(report.summary.total_customers, 2);
        assert_eq!(
            report.hourly_order_counts,
            vec![HourlyOrderCount {
                hour: "10:00".to_string(),
                orders: 1
            }]
        );
        assert!(report.issues.is_clean());
    }

    #[test]
    fn test_hourly_vs_daily_series() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T10:15:00Z", 500, "Aoi", vec![]),
            order("o2", "2024-08-01T11:45:00Z", 700, "Aoi", vec![]),
        ];

        let hourly = aggregate(&orders, "hourly", &menus, &toppings);
        assert_eq!(
            hourly.revenue_series,
            vec![
                RevenuePoint {
                    label: "2024-08-01 10:00".to_string(),
                    value: 500
                },
                RevenuePoint {
                    label: "2024-08-01 11:00".to_string(),
                    value: 700
                },
            ]
        );

        let daily = aggregate(&orders, "daily", &menus, &toppings);
        assert_eq!(daily.revenue_series.len(), 1);
        assert_eq!(daily.revenue_at("2024-08-01"), Some(1200));
    }

    #[test]
    fn test_weekly_series_groups_by_sunday() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-07T12:00:00Z", 100, "Aoi", vec![]),
            order("o2", "2024-08-04T09:00:00Z", 200, "Aoi", vec![]),
            order("o3", "2024-08-01T09:00:00Z", 400, "Aoi", vec![]),
        ];
        let report = aggregate(&orders, "weekly", &menus, &toppings);

        let labels: Vec<&str> = report
            .revenue_series
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["2024-07-28", "2024-08-04"]);
        assert_eq!(report.revenue_at("2024-08-04"), Some(300));
    }

    #[test]
    fn test_monthly_series() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-09-01T00:30:00Z", 100, "Aoi", vec![]),
            order("o2", "2024-08-31T23:30:00Z", 200, "Aoi", vec![]),
        ];
        let report = aggregate(&orders, "monthly", &menus, &toppings);
        assert_eq!(report.revenue_at("2024-08"), Some(200));
        assert_eq!(report.revenue_at("2024-09"), Some(100));
        assert_eq!(report.revenue_series[0].label, "2024-08");
    }

    #[test]
    fn test_missing_menu_item_is_skipped() {
        let (menus, toppings) = catalogs();
        let orders = vec![order(
            "o1",
            "2024-08-01T10:00:00Z",
            800,
            "Aoi",
            vec![
                OrderLine::new("ghost", 2).with_toppings(["t1"]),
                OrderLine::new("m2", 1),
            ],
        )];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        assert_eq!(report.summary.total_sales, 800);
        assert_eq!(report.menu_item_sales.len(), 1);
        assert_eq!(report.menu_item("Gyoza").unwrap().revenue, 200);
        assert_eq!(report.total_toppings, 0);
        assert_eq!(report.issues.unknown_menu_items, 1);
        // Toppings of an unresolved line are never looked at
        assert_eq!(report.issues.unknown_toppings, 0);
    }

    #[test]
    fn test_unknown_topping_is_skipped() {
        let (menus, toppings) = catalogs();
        let orders = vec![order(
            "o1",
            "2024-08-01T10:00:00Z",
            350,
            "Aoi",
            vec![OrderLine::new("m1", 1).with_toppings(["gone", "t2"])],
        )];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let usage = report.toppings_for("Ramen").unwrap();
        assert_eq!(usage.toppings.len(), 1);
        assert_eq!(usage.count("Nori"), Some(1));
        assert_eq!(report.total_toppings, 1);
        assert_eq!(report.issues.unknown_toppings, 1);
    }

    #[test]
    fn test_cashier_ties_keep_first_seen_order() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T10:00:00Z", 1500, "A", vec![]),
            order("o2", "2024-08-01T10:05:00Z", 1500, "B", vec![]),
            order("o3", "2024-08-01T10:10:00Z", 500, "C", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let ranking: Vec<(&str, i64)> = report
            .cashier_ranking
            .iter()
            .map(|c| (c.cashier.as_str(), c.total))
            .collect();
        assert_eq!(ranking, vec![("A", 1500), ("B", 1500), ("C", 500)]);
    }

    #[test]
    fn test_ranking_truncates_to_limit() {
        let (menus, toppings) = catalogs();
        let orders: Vec<Order> = (1..=7)
            .map(|i| {
                order(
                    &format!("o{i}"),
                    "2024-08-01T10:00:00Z",
                    i * 100,
                    &format!("cashier-{i}"),
                    vec![],
                )
            })
            .collect();
        let report = aggregate(&orders, "daily", &menus, &toppings);

        assert_eq!(report.cashier_ranking.len(), CASHIER_RANKING_LIMIT);
        assert_eq!(report.cashier_ranking[0].cashier, "cashier-7");
        assert_eq!(report.cashier_ranking[4].cashier, "cashier-3");
    }

    #[test]
    fn test_average_order_value() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T10:00:00Z", 500, "A", vec![]),
            order("o2", "2024-08-01T10:00:00Z", 700, "A", vec![]),
            order("o3", "2024-08-01T10:00:00Z", 800, "A", vec![]),
            order("o4", "2024-08-01T10:00:00Z", 1000, "A", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);
        assert_eq!(report.summary.total_sales, 3000);
        assert_eq!(report.summary.order_count, 4);
        assert_eq!(report.summary.average_order_value, 750.0);
    }

    #[test]
    fn test_unknown_granularity_only_empties_series() {
        let (menus, toppings) = catalogs();
        let orders = vec![order(
            "o1",
            "2024-08-01T10:00:00Z",
            300,
            "Aoi",
            vec![OrderLine::new("m1", 1)],
        )];
        let report = aggregate(&orders, "yearly", &menus, &toppings);

        assert!(report.revenue_series.is_empty());
        assert_eq!(report.granularity, None);
        assert!(report.issues.unrecognized_granularity);
        assert_eq!(report.summary.total_sales, 300);
        assert_eq!(report.menu_item_sales.len(), 1);
        assert_eq!(report.hourly_order_counts.len(), 1);
        assert_eq!(report.cashier_ranking.len(), 1);
    }

    #[test]
    fn test_malformed_time_kept_in_totals() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "not a time", 400, "Aoi", vec![OrderLine::new("m2", 2)]),
            order("o2", "2024-08-01T10:00:00Z", 600, "Ren", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        assert_eq!(report.revenue_at("2024-08-01"), Some(600));
        assert_eq!(report.revenue_series.len(), 1);
        assert_eq!(report.hourly_order_counts.len(), 1);
        assert_eq!(report.hourly_order_counts[0].orders, 1);
        assert_eq!(report.summary.total_sales, 1000);
        assert_eq!(report.menu_item("Gyoza").unwrap().quantity, 2);
        assert_eq!(report.cashier_ranking[0].cashier, "Ren");
        assert_eq!(report.cashier_ranking[1].total, 400);
        assert_eq!(report.issues.malformed_timestamps, 1);
    }

    #[test]
    fn test_topping_percentage() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order(
                "o1",
                "2024-08-01T10:00:00Z",
                0,
                "Aoi",
                vec![OrderLine::new("m1", 3).with_toppings(["t1", "t2"])],
            ),
            order(
                "o2",
                "2024-08-01T11:00:00Z",
                0,
                "Aoi",
                vec![OrderLine::new("m1", 1)],
            ),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let usage = report.toppings_for("Ramen").unwrap();
        assert_eq!(usage.total_orders, 4);
        let egg = &usage.toppings[0];
        assert_eq!(egg.topping_name, "Egg");
        assert_eq!(egg.count, 3);
        assert_eq!(egg.percentage, 75.0);
        assert_eq!(report.total_toppings, 6);
    }

    #[test]
    fn test_menu_items_in_first_seen_order() {
        let (menus, toppings) = catalogs();
        let orders = vec![order(
            "o1",
            "2024-08-01T10:00:00Z",
            0,
            "Aoi",
            vec![
                OrderLine::new("m2", 1),
                OrderLine::new("m1", 1),
                OrderLine::new("m2", 1),
            ],
        )];
        let report = aggregate(&orders, "daily", &menus, &toppings);
        let names: Vec<&str> = report
            .menu_item_sales
            .iter()
            .map(|m| m.menu_name.as_str())
            .collect();
        assert_eq!(names, vec!["Gyoza", "Ramen"]);
        assert_eq!(report.menu_item("Gyoza").unwrap().quantity, 2);
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let (menus, toppings) = catalogs();
        let mut orders = vec![order("bad", "???", 0, "A", vec![])];
        for i in 0..12 {
            orders.push(order(
                &format!("o{i:02}"),
                &format!("2024-08-01T{:02}:00:00Z", 8 + i),
                0,
                "A",
                vec![],
            ));
        }
        let report = aggregate(&orders, "daily", &menus, &toppings);

        assert_eq!(report.recent_orders.len(), RECENT_ORDERS_LIMIT);
        assert_eq!(report.recent_orders[0].id, "o11");
        assert_eq!(report.recent_orders[9].id, "o02");
    }

    #[test]
    fn test_recent_orders_unparsable_last() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("bad", "???", 0, "A", vec![]),
            order("ok", "2024-08-01T10:00:00Z", 0, "A", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);
        let ids: Vec<&str> = report.recent_orders.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "bad"]);
    }

    #[test]
    fn test_report_timezone_moves_buckets() {
        let (menus, toppings) = catalogs();
        let orders = vec![order("o1", "2024-08-01T20:30:00Z", 100, "A", vec![])];
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();

        let report = SalesAggregator::new(&menus, &toppings)
            .with_timezone(tokyo)
            .aggregate(&orders, "daily");
        assert_eq!(report.revenue_at("2024-08-02"), Some(100));
        assert_eq!(report.hourly_order_counts[0].hour, "05:00");
    }

    #[test]
    fn test_accepts_filtered_references() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T10:00:00Z", 100, "A", vec![]),
            order("o2", "2024-08-02T10:00:00Z", 200, "A", vec![]),
        ];
        let picked: Vec<&Order> = orders.iter().filter(|o| o.total_price > 150).collect();
        let report = SalesAggregator::new(&menus, &toppings).aggregate(picked, "daily");
        assert_eq!(report.summary.total_sales, 200);
    }

    #[test]
    fn test_order_totals_clamp_instead_of_overflowing() {
        let (menus, toppings) = catalogs();
        let huge = i64::MAX / 2 + 1;
        let orders = vec![
            order("o1", "2024-08-01T10:00:00Z", huge, "Aoi", vec![]),
            order("o2", "2024-08-01T11:00:00Z", huge, "Aoi", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        assert_eq!(report.summary.total_sales, i64::MAX);
        assert_eq!(report.revenue_at("2024-08-01"), Some(i64::MAX));
        assert_eq!(report.cashier_ranking[0].total, i64::MAX);
        assert_eq!(report.summary.order_count, 2);
        // total, daily bucket and cashier each clamp once
        assert_eq!(report.issues.clamped_amounts, 3);
        assert!(!report.issues.is_clean());
    }

    #[test]
    fn test_line_revenue_clamps_instead_of_overflowing() {
        let menus = menu_catalog(vec![menu("m1", "Ramen", i64::MAX / 2)]);
        let toppings = ToppingCatalog::new();
        let orders = vec![order(
            "o1",
            "2024-08-01T10:00:00Z",
            0,
            "Aoi",
            vec![OrderLine::new("m1", 3), OrderLine::new("m1", 1)],
        )];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let ramen = report.menu_item("Ramen").unwrap();
        assert_eq!(ramen.quantity, 4);
        assert_eq!(ramen.revenue, i64::MAX);
        // one for the multiplication, one for adding the second line
        assert_eq!(report.issues.clamped_amounts, 2);
    }

    #[test]
    fn test_cashier_keys_are_raw_strings() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T10:00:00Z", 300, "", vec![]),
            order("o2", "2024-08-01T10:05:00Z", 200, "aoi", vec![]),
            order("o3", "2024-08-01T10:10:00Z", 100, "Aoi", vec![]),
            order("o4", "2024-08-01T10:15:00Z", 50, "aoi", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let ranking: Vec<(&str, i64)> = report
            .cashier_ranking
            .iter()
            .map(|c| (c.cashier.as_str(), c.total))
            .collect();
        assert_eq!(ranking, vec![("", 300), ("aoi", 250), ("Aoi", 100)]);
    }

    #[test]
    fn test_hour_histogram_ascending_regardless_of_input_order() {
        let (menus, toppings) = catalogs();
        let orders = vec![
            order("o1", "2024-08-01T15:40:00Z", 0, "A", vec![]),
            order("o2", "2024-08-01T09:05:00Z", 0, "A", vec![]),
            order("o3", "2024-08-02T15:10:00Z", 0, "A", vec![]),
            order("o4", "2024-08-01T00:30:00Z", 0, "A", vec![]),
            order("o5", "2024-08-01T09:55:00Z", 0, "A", vec![]),
        ];
        let report = aggregate(&orders, "daily", &menus, &toppings);

        let hours: Vec<(&str, u64)> = report
            .hourly_order_counts
            .iter()
            .map(|h| (h.hour.as_str(), h.orders))
            .collect();
        assert_eq!(hours, vec![("00:00", 1), ("09:00", 2), ("15:00", 2)]);
    }
}
