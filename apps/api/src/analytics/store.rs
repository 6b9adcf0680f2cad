use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::analytics::models::{AnalyticsFilters, ApplicationRecord, ResumeRecord};
use crate::analytics::source::AnalyticsDataSource;
use crate::errors::AppError;
use crate::models::application::{JobApplicationRow, ResumeVersionRow};

/// PostgreSQL-backed data source over the `job_applications` and `resumes`
/// tables.
#[derive(Clone)]
pub struct PgAnalyticsStore {
    pool: PgPool,
}

impl PgAnalyticsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn applications_query(user_id: Uuid, filters: &AnalyticsFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM job_applications WHERE user_id = ");
    qb.push_bind(user_id);

    if !filters.include_archived {
        qb.push(" AND is_archived = FALSE");
    }
    if let Some(range) = filters.date_range {
        qb.push(" AND application_date BETWEEN ")
            .push_bind(range.start)
            .push(" AND ")
            .push_bind(range.end);
    }
    if let Some(company) = &filters.company {
        qb.push(" AND company ILIKE ")
            .push_bind(format!("%{}%", escape_like(company)));
    }
    if let Some(resume_id) = filters.resume_id {
        qb.push(" AND resume_id = ").push_bind(resume_id);
    }
    if let Some(status) = filters.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }

    qb.push(" ORDER BY application_date, id");
    qb
}

fn resumes_query(user_id: Uuid, filters: &AnalyticsFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM resumes WHERE user_id = ");
    qb.push_bind(user_id);
    if let Some(resume_id) = filters.resume_id {
        qb.push(" AND id = ").push_bind(resume_id);
    }
    qb.push(" ORDER BY created_at, id");
    qb
}

/// Hands each resume the applications that reference it, preserving the
/// resume order and the application order.
fn attach_applications(
    resumes: Vec<ResumeVersionRow>,
    applications: Vec<ApplicationRecord>,
) -> Vec<ResumeRecord> {
    let mut by_resume: HashMap<Uuid, Vec<ApplicationRecord>> = HashMap::new();
    for application in applications {
        if let Some(resume_id) = application.resume_id {
            by_resume.entry(resume_id).or_default().push(application);
        }
    }

    resumes
        .into_iter()
        .map(|row| ResumeRecord {
            applications: by_resume.remove(&row.id).unwrap_or_default(),
            id: row.id,
            version_name: row.version_name,
            last_used_date: row.last_used_date,
        })
        .collect()
}

#[async_trait]
impl AnalyticsDataSource for PgAnalyticsStore {
    async fn filtered_applications(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<Vec<ApplicationRecord>, AppError> {
        let rows = applications_query(user_id, filters)
            .build_query_as::<JobApplicationRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!("Loaded {} applications for user {user_id}", rows.len());

        rows.into_iter()
            .map(|row| ApplicationRecord::try_from(row).map_err(|e| AppError::Internal(e.into())))
            .collect()
    }

    async fn user_resumes(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<Vec<ResumeRecord>, AppError> {
        let resumes = resumes_query(user_id, filters)
            .build_query_as::<ResumeVersionRow>()
            .fetch_all(&self.pool)
            .await?;
        let applications = self.filtered_applications(user_id, filters).await?;

        debug!("Loaded {} resumes for user {user_id}", resumes.len());

        Ok(attach_applications(resumes, applications))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::models::{ApplicationStatus, DateRange};
    use crate::analytics::testing::{app_at, date};
    use chrono::Utc;

    #[test]
    fn test_default_filters_hide_archived() {
        let qb = applications_query(Uuid::new_v4(), &AnalyticsFilters::default());
        assert_eq!(
            qb.sql(),
            "SELECT * FROM job_applications WHERE user_id = $1 AND is_archived = FALSE \
             ORDER BY application_date, id"
        );
    }

    #[test]
    fn test_all_filters_are_bound_in_order() {
        let filters = AnalyticsFilters {
            date_range: DateRange::new(date("2024-01-01"), date("2024-02-01")),
            company: Some("acme".to_string()),
            resume_id: Some(Uuid::new_v4()),
            status: Some(ApplicationStatus::Rejected),
            include_archived: true,
            time_period: None,
        };
        let qb = applications_query(Uuid::new_v4(), &filters);
        let sql = qb.sql();
        assert!(!sql.contains("is_archived"));
        assert!(sql.contains("application_date BETWEEN $2 AND $3"));
        assert!(sql.contains("company ILIKE $4"));
        assert!(sql.contains("resume_id = $5"));
        assert!(sql.contains("status = $6"));
    }

    #[test]
    fn test_resume_filter_restricts_resumes() {
        let filters = AnalyticsFilters {
            resume_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(resumes_query(Uuid::new_v4(), &filters).sql().contains("AND id = $2"));
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Acme"), "Acme");
    }

    #[test]
    fn test_attach_applications_links_by_resume() {
        let used = Uuid::new_v4();
        let unused = Uuid::new_v4();
        let row = |id: Uuid, name: &str| ResumeVersionRow {
            id,
            user_id: Uuid::new_v4(),
            version_name: name.to_string(),
            last_used_date: None,
            created_at: Utc::now(),
        };
        let applications = vec![
            app_at("Acme", ApplicationStatus::Applied, "2024-01-01", Some(used)),
            app_at("Initech", ApplicationStatus::Applied, "2024-01-02", None),
            app_at("Globex", ApplicationStatus::Rejected, "2024-01-03", Some(used)),
        ];

        let resumes = attach_applications(vec![row(used, "v1"), row(unused, "v2")], applications);

        assert_eq!(resumes.len(), 2);
        assert_eq!(resumes[0].version_name, "v1");
        let companies: Vec<_> = resumes[0]
            .applications
            .iter()
            .map(|a| a.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Acme", "Globex"]);
        assert!(resumes[1].applications.is_empty());
    }
}
