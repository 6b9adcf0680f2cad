//! Data access boundary for the analytics engine.
//!
//! Implementations own user scoping and every filter in `AnalyticsFilters`.
//! The engine trusts the returned records as-is and never filters them again.
//!
//! Carried in `AnalyticsService` as `Arc<dyn AnalyticsDataSource>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::analytics::models::{AnalyticsFilters, ApplicationRecord, ResumeRecord};
use crate::errors::AppError;

#[async_trait]
pub trait AnalyticsDataSource: Send + Sync {
    /// Applications owned by `user_id` that pass `filters`.
    async fn filtered_applications(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<Vec<ApplicationRecord>, AppError>;

    /// Resumes owned by `user_id`, each carrying its linked applications that
    /// pass `filters`.
    async fn user_resumes(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<Vec<ResumeRecord>, AppError>;
}
