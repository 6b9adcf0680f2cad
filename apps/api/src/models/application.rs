use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analytics::models::{ApplicationRecord, UnknownStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub job_title: String,
    pub status: String,
    pub application_date: NaiveDate,
    pub resume_id: Option<Uuid>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JobApplicationRow> for ApplicationRecord {
    type Error = UnknownStatus;

    fn try_from(row: JobApplicationRow) -> Result<Self, Self::Error> {
        Ok(ApplicationRecord {
            id: row.id,
            status: row.status.parse()?,
            company: row.company,
            job_title: row.job_title,
            application_date: row.application_date,
            updated_at: row.updated_at,
            resume_id: row.resume_id,
            is_archived: row.is_archived,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeVersionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version_name: String,
    pub last_used_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
