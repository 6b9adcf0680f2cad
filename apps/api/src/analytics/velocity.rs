use chrono::NaiveDate;

use crate::analytics::math::{first_max_by, round2};
use crate::analytics::models::{
    ApplicationRecord, PeakPeriod, PeriodCount, TimePeriod, TimelineAnalytics, TimelineSummary,
    VelocityMetrics,
};
use crate::analytics::trends::period_counts;

/// Number of buckets reported as peak periods.
const PEAK_PERIODS: usize = 5;

/// Whole days between the oldest and newest application. 0 for fewer than two
/// records.
pub fn timespan_days(applications: &[ApplicationRecord]) -> i64 {
    match date_bounds(applications) {
        Some((oldest, newest)) if applications.len() >= 2 => (newest - oldest).num_days(),
        _ => 0,
    }
}

fn date_bounds(applications: &[ApplicationRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let oldest = applications.iter().map(|a| a.application_date).min()?;
    let newest = applications.iter().map(|a| a.application_date).max()?;
    Some((oldest, newest))
}

/// `count / max(timespan_days / window_days, 1)`. The floor of one window keeps
/// single-day datasets from producing inflated rates.
fn rate_per(count: usize, timespan_days: i64, window_days: f64) -> f64 {
    let windows = (timespan_days as f64 / window_days).max(1.0);
    round2(count as f64 / windows)
}

/// Top buckets by count, ranked from 1. Ties keep bucket order.
pub fn peak_periods(counts: &[PeriodCount]) -> Vec<PeakPeriod> {
    let mut ranked: Vec<&PeriodCount> = counts.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
        .into_iter()
        .take(PEAK_PERIODS)
        .enumerate()
        .map(|(i, p)| PeakPeriod {
            rank: i + 1,
            period: p.period.clone(),
            count: p.count,
        })
        .collect()
}

/// Most and least active months. Ties resolve to the earlier month.
pub fn month_extremes(applications: &[ApplicationRecord]) -> (String, String) {
    let months = period_counts(applications, TimePeriod::Monthly);
    let most = first_max_by(&months, |m| m.count as f64);
    let least = first_max_by(&months, |m| -(m.count as f64));
    (
        most.map(|m| m.period.clone()).unwrap_or_default(),
        least.map(|l| l.period.clone()).unwrap_or_default(),
    )
}

/// Application throughput over the observed timespan.
///
/// `today` is only used as the empty-state date sentinel in the summary.
pub fn timeline_analytics(
    applications: &[ApplicationRecord],
    period: TimePeriod,
    today: NaiveDate,
) -> TimelineAnalytics {
    let Some((oldest, newest)) = date_bounds(applications) else {
        return TimelineAnalytics::empty(today);
    };

    let count = applications.len();
    let total_timespan_days = timespan_days(applications);
    let applications_per_week = rate_per(count, total_timespan_days, 7.0);
    let applications_per_month = rate_per(count, total_timespan_days, 30.0);

    let velocity_trend = period_counts(applications, period);
    let peak_application_periods = peak_periods(&velocity_trend);
    let (most_active_month, least_active_month) = month_extremes(applications);

    TimelineAnalytics {
        velocity: VelocityMetrics {
            applications_per_week,
            applications_per_month,
            total_timespan_days,
            velocity_trend,
        },
        peak_application_periods,
        summary: TimelineSummary {
            oldest_application: oldest,
            newest_application: newest,
            total_timespan_days,
            average_applications_per_month: applications_per_month,
            most_active_month,
            least_active_month,
        },
    }
}
