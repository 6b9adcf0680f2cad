use chrono::{DateTime, Duration, Utc};

use crate::analytics::distribution::status_distribution;
use crate::analytics::math::mean;
use crate::analytics::models::{ApplicationRecord, PipelineAnalytics, PipelineSummary, TimePeriod};
use crate::analytics::trends::applications_trends;

/// Headline pipeline counts.
///
/// `average_time_in_pipeline` is the mean number of days since each
/// application date, including applications that already reached a terminal
/// status. It measures elapsed time, not time spent in the pipeline.
///
/// A negative `recent_activity_days` counts only updates made at `now`; a
/// window reaching past the calendar counts every record.
pub fn pipeline_summary(
    applications: &[ApplicationRecord],
    now: DateTime<Utc>,
    recent_activity_days: i64,
) -> PipelineSummary {
    let today = now.date_naive();
    let recent_cutoff = Duration::try_days(recent_activity_days.max(0))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let completed_applications = applications
        .iter()
        .filter(|a| a.status.is_terminal())
        .count();
    let recent_activity_count = applications
        .iter()
        .filter(|a| a.updated_at >= recent_cutoff)
        .count();
    let total_days: i64 = applications
        .iter()
        .map(|a| (today - a.application_date).num_days())
        .sum();

    PipelineSummary {
        total_applications: applications.len(),
        active_applications: applications.len() - completed_applications,
        completed_applications,
        recent_activity_count,
        average_time_in_pipeline: mean(total_days as f64, applications.len()),
    }
}

pub fn pipeline_analytics(
    applications: &[ApplicationRecord],
    period: TimePeriod,
    now: DateTime<Utc>,
    recent_activity_days: i64,
) -> PipelineAnalytics {
    PipelineAnalytics {
        status_distribution: status_distribution(applications),
        applications_trends: applications_trends(applications, period),
        summary: pipeline_summary(applications, now, recent_activity_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::models::ApplicationStatus::*;
    use crate::analytics::testing::app;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_pipeline_is_zeroed() {
        let analytics = pipeline_analytics(&[], TimePeriod::Weekly, now(), 7);
        assert!(analytics.status_distribution.is_empty());
        assert!(analytics.applications_trends.is_empty());
        assert_eq!(analytics.summary, PipelineSummary::default());
        assert_eq!(analytics.summary.average_time_in_pipeline, 0.0);
    }

    #[test]
    fn test_active_and_completed_split() {
        let apps = vec![
            app(Applied, "2024-01-01"),
            app(OfferReceived, "2024-01-02"),
            app(OfferAccepted, "2024-01-03"),
            app(Declined, "2024-01-04"),
            app(Rejected, "2024-01-05"),
        ];
        let summary = pipeline_summary(&apps, now(), 7);
        assert_eq!(summary.total_applications, 5);
        assert_eq!(summary.active_applications, 2);
        assert_eq!(summary.completed_applications, 3);
    }

    #[test]
    fn test_recent_activity_uses_updated_at_window() {
        let mut stale = app(Applied, "2024-01-01");
        stale.updated_at = now() - Duration::days(8);
        let mut fresh = app(PhoneScreen, "2024-01-01");
        fresh.updated_at = now() - Duration::days(2);
        let summary = pipeline_summary(&[stale, fresh], now(), 7);
        assert_eq!(summary.recent_activity_count, 1);
    }

    #[test]
    fn test_recent_activity_window_out_of_range() {
        let mut stale = app(Applied, "2024-01-01");
        stale.updated_at = now() - Duration::days(400);
        let mut current = app(PhoneScreen, "2024-01-01");
        current.updated_at = now();
        let apps = [stale, current];

        assert_eq!(pipeline_summary(&apps, now(), -7).recent_activity_count, 1);
        assert_eq!(pipeline_summary(&apps, now(), i64::MAX).recent_activity_count, 2);
    }

    #[test]
    fn test_average_time_counts_terminal_records() {
        // 30 days and 20 days before 2024-01-31.
        let apps = vec![app(Rejected, "2024-01-01"), app(Applied, "2024-01-11")];
        let summary = pipeline_summary(&apps, now(), 7);
        assert_eq!(summary.average_time_in_pipeline, 25.0);
    }
}
