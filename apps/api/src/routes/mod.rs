pub mod health;

use axum::{routing::get, Router};

use crate::analytics::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analytics API
        .route("/api/v1/analytics", get(handlers::handle_complete))
        .route("/api/v1/analytics/pipeline", get(handlers::handle_pipeline))
        .route(
            "/api/v1/analytics/resumes",
            get(handlers::handle_resume_performance),
        )
        .route("/api/v1/analytics/timeline", get(handlers::handle_timeline))
        .route(
            "/api/v1/analytics/conversion",
            get(handlers::handle_conversion),
        )
        .with_state(state)
}
