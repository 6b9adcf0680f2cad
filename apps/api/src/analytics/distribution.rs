use std::collections::BTreeMap;

use crate::analytics::math::percentage;
use crate::analytics::models::{ApplicationRecord, ApplicationStatus, StatusDistribution};

/// Counts applications per status and converts the counts to percentages.
///
/// Only statuses that occur are reported, in funnel order. Empty input yields
/// an empty list.
pub fn status_distribution(applications: &[ApplicationRecord]) -> Vec<StatusDistribution> {
    status_distribution_of(applications)
}

/// Same as `status_distribution`, over borrowed records from any source.
pub fn status_distribution_of<'a, I>(applications: I) -> Vec<StatusDistribution>
where
    I: IntoIterator<Item = &'a ApplicationRecord>,
{
    let mut total = 0;
    let mut counts: BTreeMap<ApplicationStatus, usize> = BTreeMap::new();
    for application in applications {
        total += 1;
        *counts.entry(application.status).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(status, count)| StatusDistribution {
            status,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}
