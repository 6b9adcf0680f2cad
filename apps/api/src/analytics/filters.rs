use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::analytics::models::{AnalyticsFilters, DateRange};

/// Raw query string parameters accepted by every analytics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub user_id: Uuid,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub company: Option<String>,
    pub resume_id: Option<String>,
    pub status: Option<String>,
    pub include_archived: Option<String>,
    pub time_period: Option<String>,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Both bounds must parse and be ordered; anything else means "no date filter".
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> Option<DateRange> {
    let start = parse_date(start?)?;
    let end = parse_date(end?)?;
    DateRange::new(start, end)
}

/// `true` or `false`, case-insensitive. Anything else is treated as absent.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl AnalyticsQuery {
    /// Normalises raw parameters. Invalid values are dropped, never reported.
    pub fn to_filters(&self) -> AnalyticsFilters {
        let date_range = parse_date_range(self.start_date.as_deref(), self.end_date.as_deref());
        if date_range.is_none() && (self.start_date.is_some() || self.end_date.is_some()) {
            debug!(
                start = ?self.start_date,
                end = ?self.end_date,
                "Ignoring incomplete or invalid date range"
            );
        }

        AnalyticsFilters {
            date_range,
            company: self
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            resume_id: self
                .resume_id
                .as_deref()
                .and_then(|id| Uuid::parse_str(id.trim()).ok()),
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
            include_archived: self
                .include_archived
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(false),
            time_period: self.time_period.as_deref().and_then(|p| p.parse().ok()),
        }
    }
}
