//! Dashboard date range filter

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use super::{ReportError, parse_order_time};
use crate::models::Order;

/// Inclusive `[from, to]` window applied before aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRange {
    pub from: Option<DateTime<Tz>>,
    pub to: Option<DateTime<Tz>>,
}

impl TimeRange {
    /// Build a range from raw query bounds
    ///
    /// A bare date as `to` covers that whole local day.
    pub fn parse(from: Option<&str>, to: Option<&str>, tz: Tz) -> Result<Self, ReportError> {
        let from = from
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_order_time(s, tz))
            .transpose()?;
        let to = to
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_range_end(s, tz))
            .transpose()?;
        Ok(Self { from, to })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, time: &DateTime<Tz>) -> bool {
        self.from.as_ref().is_none_or(|from| time >= from)
            && self.to.as_ref().is_none_or(|to| time <= to)
    }

    /// Orders inside the range
    ///
    /// With no bounds every order is kept, including ones whose time does
    /// not parse. With any bound those are dropped.
    pub fn filter<'a>(&self, orders: &'a [Order], tz: Tz) -> Vec<&'a Order> {
        if self.is_unbounded() {
            return orders.iter().collect();
        }
        orders
            .iter()
            .filter(|order| {
                parse_order_time(&order.time, tz)
                    .map(|time| self.contains(&time))
                    .unwrap_or(false)
            })
            .collect()
    }
}

fn parse_range_end(raw: &str, tz: Tz) -> Result<DateTime<Tz>, ReportError> {
    let s = raw.trim();
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_milli_opt(23, 59, 59, 999)
            .and_then(|naive| naive.and_local_timezone(tz).latest())
            .ok_or_else(|| ReportError::MalformedTimestamp(raw.to_string())),
        Err(_) => parse_order_time(s, tz),
    }
}
