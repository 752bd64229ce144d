//! Sales API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::report::{SalesAggregator, SalesReport, TimeRange};

use crate::core::ServerState;
use crate::utils::AppResult;

/// Granularity used when `range` is absent
pub const DEFAULT_RANGE: &str = "daily";

/// 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    /// hourly | daily | weekly | monthly
    pub range: Option<String>,
    /// 起始时间 (含)
    pub from: Option<String>,
    /// 结束时间 (含)；纯日期表示当天结束
    pub to: Option<String>,
}

/// GET /api/sales/{circle_id} - 销售报表
pub async fn report(
    State(state): State<ServerState>,
    Path(circle_id): Path<String>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<SalesReport>> {
    let tz = state.timezone();
    let window = TimeRange::parse(query.from.as_deref(), query.to.as_deref(), tz)?;

    let orders = state.orders.list_orders(&circle_id)?;
    let menus = state.catalog.menu_catalog(&circle_id)?;
    let toppings = state.catalog.topping_catalog(&circle_id)?;

    let range = query.range.as_deref().unwrap_or(DEFAULT_RANGE);
    let selected = window.filter(&orders, tz);

    let report = SalesAggregator::new(&menus, &toppings)
        .with_timezone(tz)
        .aggregate(selected, range);

    if !report.issues.is_clean() {
        tracing::warn!(
            circle_id = %circle_id,
            malformed_timestamps = report.issues.malformed_timestamps,
            unknown_menu_items = report.issues.unknown_menu_items,
            unknown_toppings = report.issues.unknown_toppings,
            unrecognized_granularity = report.issues.unrecognized_granularity,
            "Sales report degraded"
        );
    }
    tracing::debug!(
        circle_id = %circle_id,
        range = %range,
        orders = report.summary.order_count,
        total_sales = report.summary.total_sales,
        "Sales report built"
    );

    Ok(Json(report))
}
