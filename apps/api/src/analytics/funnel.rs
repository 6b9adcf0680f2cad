//! Hiring funnel conversion.
//!
//! Funnel stages, in order: Applied → PhoneScreen → TechnicalInterview →
//! OnsiteInterview → OfferReceived → OfferAccepted. Declined and Rejected are
//! terminal states outside the funnel and count toward no stage.
//!
//! Only an application's current status is known, so a record that reached a
//! phone screen and was later rejected is not counted at the phone screen
//! stage.

use std::collections::HashMap;

use uuid::Uuid;

use crate::analytics::distribution::status_distribution_of;
use crate::analytics::math::{first_max_by, percentage};
use crate::analytics::models::{
    ApplicationRecord, ApplicationStatus, ConversionAnalytics, ConversionRates, ConversionSummary,
    GroupConversion, TimePeriod,
};
use crate::analytics::trends::group_by_period;

/// Position of a status in the funnel, or `None` for terminal non-progress
/// states.
pub fn funnel_stage(status: ApplicationStatus) -> Option<usize> {
    match status {
        ApplicationStatus::Applied => Some(0),
        ApplicationStatus::PhoneScreen => Some(1),
        ApplicationStatus::TechnicalInterview => Some(2),
        ApplicationStatus::OnsiteInterview => Some(3),
        ApplicationStatus::OfferReceived => Some(4),
        ApplicationStatus::OfferAccepted => Some(5),
        ApplicationStatus::Declined | ApplicationStatus::Rejected => None,
    }
}

/// Number of applications whose status is `stage` or any later funnel stage.
pub fn progressive_count<'a, I>(applications: I, stage: ApplicationStatus) -> usize
where
    I: IntoIterator<Item = &'a ApplicationRecord>,
{
    let Some(threshold) = funnel_stage(stage) else {
        return 0;
    };
    applications
        .into_iter()
        .filter(|a| funnel_stage(a.status).is_some_and(|s| s >= threshold))
        .count()
}

/// Conversion rates for any slice of applications.
pub fn conversion_rates<'a, I>(applications: I) -> ConversionRates
where
    I: IntoIterator<Item = &'a ApplicationRecord>,
{
    use crate::analytics::models::ApplicationStatus::*;

    let applications: Vec<&ApplicationRecord> = applications.into_iter().collect();
    let total = applications.len();
    let count = |stage| progressive_count(applications.iter().copied(), stage);

    let phone = count(PhoneScreen);
    let technical = count(TechnicalInterview);
    let onsite = count(OnsiteInterview);
    let offer = count(OfferReceived);
    let accepted = count(OfferAccepted);

    ConversionRates {
        application_to_phone_screen: percentage(phone, total),
        phone_screen_to_technical: percentage(technical, phone),
        technical_to_onsite: percentage(onsite, technical),
        onsite_to_offer: percentage(offer, onsite),
        offer_to_accepted: percentage(accepted, offer),
        overall_application_to_offer: percentage(offer, total),
    }
}

fn group_conversion(group: String, applications: Vec<&ApplicationRecord>) -> GroupConversion {
    GroupConversion {
        group,
        total_applications: applications.len(),
        conversion_rates: conversion_rates(applications.iter().copied()),
        final_outcomes: status_distribution_of(applications),
    }
}

/// Groups by `key`, keeping groups in first-appearance order. Records for which
/// `key` returns `None` are left out.
fn group_in_order<'a, F>(
    applications: &'a [ApplicationRecord],
    key: F,
) -> Vec<(String, Vec<&'a ApplicationRecord>)>
where
    F: Fn(&ApplicationRecord) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&ApplicationRecord>)> = Vec::new();
    for application in applications {
        let Some(k) = key(application) else {
            continue;
        };
        match index.get(&k) {
            Some(&i) => groups[i].1.push(application),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![application]));
            }
        }
    }
    groups
}

pub fn conversion_by_company(applications: &[ApplicationRecord]) -> Vec<GroupConversion> {
    group_in_order(applications, |a| Some(a.company.clone()))
        .into_iter()
        .map(|(company, group)| group_conversion(company, group))
        .collect()
}

/// Applications without a resume are not part of any resume slice.
pub fn conversion_by_resume(applications: &[ApplicationRecord]) -> Vec<GroupConversion> {
    group_in_order(applications, |a| a.resume_id.map(|id: Uuid| id.to_string()))
        .into_iter()
        .map(|(resume, group)| group_conversion(resume, group))
        .collect()
}

pub fn conversion_by_period(
    applications: &[ApplicationRecord],
    period: TimePeriod,
) -> Vec<GroupConversion> {
    group_by_period(applications, period)
        .into_iter()
        .map(|(key, group)| group_conversion(key, group))
        .collect()
}

/// First group with the highest overall application-to-offer rate. Later groups
/// must be strictly better to win, so ties go to the earlier group.
pub fn best_converting(groups: &[GroupConversion]) -> Option<&GroupConversion> {
    first_max_by(groups, |g| g.conversion_rates.overall_application_to_offer)
}

fn best_group_name(groups: &[GroupConversion]) -> String {
    best_converting(groups)
        .map(|g| g.group.clone())
        .unwrap_or_default()
}

/// Full conversion view: global rates plus company, resume and period slices.
pub fn conversion_analytics(
    applications: &[ApplicationRecord],
    period: TimePeriod,
) -> ConversionAnalytics {
    let by_company = conversion_by_company(applications);
    let by_resume = conversion_by_resume(applications);
    let by_period = conversion_by_period(applications, period);

    let summary = ConversionSummary {
        total_applications: applications.len(),
        best_converting_company: best_group_name(&by_company),
        best_converting_resume: best_group_name(&by_resume),
        best_converting_period: best_group_name(&by_period),
    };

    ConversionAnalytics {
        overall_conversion: conversion_rates(applications),
        conversion_by_company: by_company,
        conversion_by_resume: by_resume,
        conversion_by_period: by_period,
        summary,
    }
}
