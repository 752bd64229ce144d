//! Time bucketing

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::ReportError;

/// Revenue series bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// `YYYY-MM-DD HH:00`
    Hourly,
    /// `YYYY-MM-DD`
    Daily,
    /// `YYYY-MM-DD` of the Sunday starting the week
    Weekly,
    /// `YYYY-MM`
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Granularity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ReportError::UnrecognizedGranularity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naive layouts accepted besides RFC 3339, interpreted in the report zone
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an order timestamp into the report time zone
///
/// Accepts RFC 3339 (`2024-08-01T10:15:00Z`, `2024-08-01T19:15:00+09:00`),
/// naive date-times (taken as local to `tz`) and bare dates (local midnight).
pub fn parse_order_time(raw: &str, tz: Tz) -> Result<DateTime<Tz>, ReportError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ReportError::MalformedTimestamp(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(localize(naive, tz));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| localize(naive, tz))
        .ok_or_else(|| ReportError::MalformedTimestamp(raw.to_string()))
}

/// Local wall time → zoned time
///
/// DST gap fallback: a wall time that does not exist is read as UTC.
fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    naive
        .and_local_timezone(tz)
        .latest()
        .unwrap_or_else(|| naive.and_utc().with_timezone(&tz))
}

/// Bucket key of `time` for the revenue series
pub fn bucket_key(time: &DateTime<Tz>, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hourly => time.format("%Y-%m-%d %H:00").to_string(),
        Granularity::Daily => time.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let date = time.date_naive();
            let offset = date.weekday().num_days_from_sunday();
            let week_start = date - Duration::days(i64::from(offset));
            week_start.format("%Y-%m-%d").to_string()
        }
        Granularity::Monthly => time.format("%Y-%m").to_string(),
    }
}

/// Hour-of-day key (`HH:00`), independent of the series granularity
pub fn hour_key(time: &DateTime<Tz>) -> String {
    time.format("%H:00").to_string()
}
