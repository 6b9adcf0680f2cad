use axum::{
    extract::{Query, State},
    Json,
};

use crate::analytics::filters::AnalyticsQuery;
use crate::analytics::models::{
    CompleteAnalytics, ConversionAnalytics, PipelineAnalytics, ResumePerformanceAnalytics,
    TimelineAnalytics,
};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/analytics/pipeline
pub async fn handle_pipeline(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<PipelineAnalytics> {
    let filters = query.to_filters();
    Json(state.analytics.pipeline_analytics(query.user_id, &filters).await)
}

/// GET /api/v1/analytics/resumes
pub async fn handle_resume_performance(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<ResumePerformanceAnalytics> {
    let filters = query.to_filters();
    Json(
        state
            .analytics
            .resume_performance_analytics(query.user_id, &filters)
            .await,
    )
}

/// GET /api/v1/analytics/timeline
pub async fn handle_timeline(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<TimelineAnalytics> {
    let filters = query.to_filters();
    Json(state.analytics.timeline_analytics(query.user_id, &filters).await)
}

/// GET /api/v1/analytics/conversion
pub async fn handle_conversion(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<ConversionAnalytics> {
    let filters = query.to_filters();
    Json(state.analytics.conversion_analytics(query.user_id, &filters).await)
}

/// GET /api/v1/analytics
///
/// The only analytics endpoint that reports data access failures to the caller.
pub async fn handle_complete(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<CompleteAnalytics>, AppError> {
    let filters = query.to_filters();
    let analytics = state
        .analytics
        .complete_analytics(query.user_id, &filters)
        .await?;
    Ok(Json(analytics))
}
