//! Record builders shared by the analytics unit tests.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::analytics::models::{ApplicationRecord, ApplicationStatus, ResumeRecord};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date must be YYYY-MM-DD")
}

pub fn app(status: ApplicationStatus, applied_on: &str) -> ApplicationRecord {
    app_at("Acme", status, applied_on, None)
}

pub fn app_at(
    company: &str,
    status: ApplicationStatus,
    applied_on: &str,
    resume_id: Option<Uuid>,
) -> ApplicationRecord {
    let application_date = date(applied_on);
    ApplicationRecord {
        id: Uuid::new_v4(),
        company: company.to_string(),
        job_title: "Backend Engineer".to_string(),
        status,
        application_date,
        updated_at: Utc.from_utc_datetime(
            &application_date
                .and_hms_opt(12, 0, 0)
                .expect("noon is a valid time"),
        ),
        resume_id,
        is_archived: false,
    }
}

/// One application per status, all dated 2024-01-15.
pub fn apps_with_statuses(statuses: &[ApplicationStatus]) -> Vec<ApplicationRecord> {
    statuses.iter().map(|s| app(*s, "2024-01-15")).collect()
}

pub fn resume(version_name: &str, statuses: &[ApplicationStatus]) -> ResumeRecord {
    let id = Uuid::new_v4();
    ResumeRecord {
        id,
        version_name: version_name.to_string(),
        last_used_date: Some(date("2024-02-01")),
        applications: statuses
            .iter()
            .map(|s| app_at("Acme", *s, "2024-01-15", Some(id)))
            .collect(),
    }
}
