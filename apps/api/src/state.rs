use crate::analytics::service::AnalyticsService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analytics views over a pluggable data source. Default: `PgAnalyticsStore`.
    pub analytics: AnalyticsService,
}
