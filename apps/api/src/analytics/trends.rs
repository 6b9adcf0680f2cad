use std::collections::BTreeMap;

use crate::analytics::models::{
    ApplicationRecord, ApplicationStatus, ApplicationsTrend, PeriodCount, TimePeriod,
};
use crate::analytics::periods::bucket_key;

/// Groups applications by period key. Keys iterate in ascending order.
pub fn group_by_period(
    applications: &[ApplicationRecord],
    period: TimePeriod,
) -> BTreeMap<String, Vec<&ApplicationRecord>> {
    let mut groups: BTreeMap<String, Vec<&ApplicationRecord>> = BTreeMap::new();
    for application in applications {
        groups
            .entry(bucket_key(application.application_date, period))
            .or_default()
            .push(application);
    }
    groups
}

/// Per-period counts of applications, split into new applications (still
/// `Applied`) and those that have moved to another status.
///
/// Only observed periods are emitted, ascending by key.
pub fn applications_trends(
    applications: &[ApplicationRecord],
    period: TimePeriod,
) -> Vec<ApplicationsTrend> {
    group_by_period(applications, period)
        .into_iter()
        .map(|(period, group)| {
            let count = group.len();
            let new_applications = group
                .iter()
                .filter(|a| a.status == ApplicationStatus::Applied)
                .count();
            ApplicationsTrend {
                period,
                count,
                new_applications,
                status_changes: count - new_applications,
            }
        })
        .collect()
}

/// Counts only, same grouping as `applications_trends`.
pub fn period_counts(applications: &[ApplicationRecord], period: TimePeriod) -> Vec<PeriodCount> {
    group_by_period(applications, period)
        .into_iter()
        .map(|(period, group)| PeriodCount {
            period,
            count: group.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::app;
    use crate::analytics::models::ApplicationStatus::*;

    #[test]
    fn test_empty_input_has_no_buckets() {
        assert!(applications_trends(&[], TimePeriod::Weekly).is_empty());
        assert!(period_counts(&[], TimePeriod::Monthly).is_empty());
    }

    #[test]
    fn test_weekly_trend_splits_new_and_changed() {
        let apps = vec![
            app(Applied, "2024-01-02"),
            app(PhoneScreen, "2024-01-03"),
            app(Rejected, "2024-01-06"),
            app(Applied, "2024-01-07"),
        ];
        let trends = applications_trends(&apps, TimePeriod::Weekly);
        assert_eq!(
            trends,
            vec![
                ApplicationsTrend {
                    period: "2023-12-31".to_string(),
                    count: 3,
                    new_applications: 1,
                    status_changes: 2,
                },
                ApplicationsTrend {
                    period: "2024-01-07".to_string(),
                    count: 1,
                    new_applications: 1,
                    status_changes: 0,
                },
            ]
        );
    }

    #[test]
    fn test_gaps_are_not_filled() {
        let apps = vec![app(Applied, "2024-01-15"), app(Applied, "2024-04-15")];
        let periods: Vec<_> = applications_trends(&apps, TimePeriod::Monthly)
            .into_iter()
            .map(|t| t.period)
            .collect();
        assert_eq!(periods, vec!["2024-01", "2024-04"]);
    }

    #[test]
    fn test_buckets_sorted_regardless_of_input_order() {
        let apps = vec![
            app(Applied, "2024-03-01"),
            app(Applied, "2024-01-01"),
            app(Applied, "2024-02-01"),
        ];
        let periods: Vec<_> = period_counts(&apps, TimePeriod::Daily)
            .into_iter()
            .map(|p| p.period)
            .collect();
        assert_eq!(periods, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }
}
