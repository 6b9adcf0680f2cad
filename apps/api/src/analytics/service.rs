//! Analytics orchestration.
//!
//! Flow per view: fetch filtered records from the data source → run the pure
//! calculators → return the view DTO.
//!
//! The four single views soft-fail: any error is logged and the zeroed view is
//! returned instead. `complete_analytics` propagates errors unchanged.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::analytics::funnel::conversion_analytics;
use crate::analytics::models::{
    AnalyticsFilters, CompleteAnalytics, ConversionAnalytics, DateRange, PipelineAnalytics,
    ResumePerformanceAnalytics, TimePeriod, TimelineAnalytics,
};
use crate::analytics::pipeline::pipeline_analytics;
use crate::analytics::resumes::resume_performance;
use crate::analytics::source::AnalyticsDataSource;
use crate::analytics::velocity::timeline_analytics;
use crate::errors::AppError;

/// Default bucketing when the caller does not pick a time period.
const PIPELINE_DEFAULT_PERIOD: TimePeriod = TimePeriod::Weekly;
const TIMELINE_DEFAULT_PERIOD: TimePeriod = TimePeriod::Weekly;
const CONVERSION_DEFAULT_PERIOD: TimePeriod = TimePeriod::Monthly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// Length of the reported date range when the caller gives none.
    pub default_range_days: i64,
    /// Window for `recent_activity_count`, measured on `updated_at`.
    pub recent_activity_days: i64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            default_range_days: 90,
            recent_activity_days: 7,
        }
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    source: Arc<dyn AnalyticsDataSource>,
    settings: AnalyticsSettings,
}

/// Returns the computed view, or logs the failure and returns `fallback`.
fn or_fallback<T>(view: &str, user_id: Uuid, result: Result<T, AppError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(view, %user_id, "Analytics view failed, returning empty result: {e:?}");
            fallback
        }
    }
}

/// Caller-supplied range, else the last `days` days ending today. Negative
/// windows collapse to today; windows past the calendar start at `NaiveDate::MIN`.
pub fn effective_date_range(
    filters: &AnalyticsFilters,
    now: DateTime<Utc>,
    days: i64,
) -> DateRange {
    filters.date_range.unwrap_or_else(|| {
        let end = now.date_naive();
        let start = Duration::try_days(days.max(0))
            .and_then(|window| end.checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);
        DateRange { start, end }
    })
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn AnalyticsDataSource>, settings: AnalyticsSettings) -> Self {
        Self { source, settings }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Fallible computations
    // ────────────────────────────────────────────────────────────────────────

    async fn try_pipeline(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
        now: DateTime<Utc>,
    ) -> Result<PipelineAnalytics, AppError> {
        let applications = self.source.filtered_applications(user_id, filters).await?;
        Ok(pipeline_analytics(
            &applications,
            filters.time_period.unwrap_or(PIPELINE_DEFAULT_PERIOD),
            now,
            self.settings.recent_activity_days,
        ))
    }

    async fn try_resume_performance(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<ResumePerformanceAnalytics, AppError> {
        let resumes = self.source.user_resumes(user_id, filters).await?;
        Ok(resume_performance(&resumes))
    }

    async fn try_timeline(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
        now: DateTime<Utc>,
    ) -> Result<TimelineAnalytics, AppError> {
        let applications = self.source.filtered_applications(user_id, filters).await?;
        Ok(timeline_analytics(
            &applications,
            filters.time_period.unwrap_or(TIMELINE_DEFAULT_PERIOD),
            now.date_naive(),
        ))
    }

    async fn try_conversion(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<ConversionAnalytics, AppError> {
        let applications = self.source.filtered_applications(user_id, filters).await?;
        Ok(conversion_analytics(
            &applications,
            filters.time_period.unwrap_or(CONVERSION_DEFAULT_PERIOD),
        ))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Soft-failing views
    // ────────────────────────────────────────────────────────────────────────

    pub async fn pipeline_analytics(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> PipelineAnalytics {
        let result = self.try_pipeline(user_id, filters, Utc::now()).await;
        or_fallback("pipeline", user_id, result, PipelineAnalytics::default())
    }

    pub async fn resume_performance_analytics(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> ResumePerformanceAnalytics {
        let result = self.try_resume_performance(user_id, filters).await;
        or_fallback(
            "resume_performance",
            user_id,
            result,
            ResumePerformanceAnalytics::default(),
        )
    }

    pub async fn timeline_analytics(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> TimelineAnalytics {
        let now = Utc::now();
        let result = self.try_timeline(user_id, filters, now).await;
        or_fallback(
            "timeline",
            user_id,
            result,
            TimelineAnalytics::empty(now.date_naive()),
        )
    }

    pub async fn conversion_analytics(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> ConversionAnalytics {
        let result = self.try_conversion(user_id, filters).await;
        or_fallback("conversion", user_id, result, ConversionAnalytics::default())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Combined view
    // ────────────────────────────────────────────────────────────────────────

    /// All four views computed concurrently. The first failure is returned as
    /// is; a partial report is never produced.
    pub async fn complete_analytics(
        &self,
        user_id: Uuid,
        filters: &AnalyticsFilters,
    ) -> Result<CompleteAnalytics, AppError> {
        let now = Utc::now();
        let (pipeline, resume_performance, timeline, conversion) = tokio::try_join!(
            self.try_pipeline(user_id, filters, now),
            self.try_resume_performance(user_id, filters),
            self.try_timeline(user_id, filters, now),
            self.try_conversion(user_id, filters),
        )?;

        info!(
            %user_id,
            total_applications = pipeline.summary.total_applications,
            "Generated complete analytics"
        );

        Ok(CompleteAnalytics {
            pipeline,
            resume_performance,
            timeline,
            conversion,
            generated_at: now,
            date_range: effective_date_range(filters, now, self.settings.default_range_days),
        })
    }
}
