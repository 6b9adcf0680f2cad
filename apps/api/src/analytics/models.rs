use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Input records
// ────────────────────────────────────────────────────────────────────────────

/// Application status. Variant order is the hiring funnel order, with the two
/// terminal non-progress states last; `Ord` follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    PhoneScreen,
    TechnicalInterview,
    OnsiteInterview,
    OfferReceived,
    OfferAccepted,
    Declined,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 8] = [
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreen,
        ApplicationStatus::TechnicalInterview,
        ApplicationStatus::OnsiteInterview,
        ApplicationStatus::OfferReceived,
        ApplicationStatus::OfferAccepted,
        ApplicationStatus::Declined,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::PhoneScreen => "PHONE_SCREEN",
            ApplicationStatus::TechnicalInterview => "TECHNICAL_INTERVIEW",
            ApplicationStatus::OnsiteInterview => "ONSITE_INTERVIEW",
            ApplicationStatus::OfferReceived => "OFFER_RECEIVED",
            ApplicationStatus::OfferAccepted => "OFFER_ACCEPTED",
            ApplicationStatus::Declined => "DECLINED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    /// Terminal statuses end the pipeline: accepted, declined or rejected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::OfferAccepted
                | ApplicationStatus::Declined
                | ApplicationStatus::Rejected
        )
    }

    pub fn is_offer(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::OfferReceived | ApplicationStatus::OfferAccepted
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Bucketing granularity for period-based views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for TimePeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(TimePeriod::Daily),
            "weekly" => Ok(TimePeriod::Weekly),
            "monthly" => Ok(TimePeriod::Monthly),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub company: String,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub application_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
    pub resume_id: Option<Uuid>,
    pub is_archived: bool,
}

/// A resume version together with the applications submitted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub version_name: String,
    pub last_used_date: Option<NaiveDate>,
    pub applications: Vec<ApplicationRecord>,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `start > end`; such a range is treated as no range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }
}

/// Filters applied by the data source before the engine sees any record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsFilters {
    pub date_range: Option<DateRange>,
    pub company: Option<String>,
    pub resume_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub include_archived: bool,
    pub time_period: Option<TimePeriod>,
}

// ────────────────────────────────────────────────────────────────────────────
// Output DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDistribution {
    pub status: ApplicationStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationsTrend {
    pub period: String,
    pub count: usize,
    pub new_applications: usize,
    pub status_changes: usize,
}

/// Stage-to-stage conversion percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConversionRates {
    pub application_to_phone_screen: f64,
    pub phone_screen_to_technical: f64,
    pub technical_to_onsite: f64,
    pub onsite_to_offer: f64,
    pub offer_to_accepted: f64,
    pub overall_application_to_offer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeMetrics {
    pub resume_id: Uuid,
    pub version_name: String,
    pub usage_count: usize,
    pub conversion_rates: ConversionRates,
    pub success_rate: f64,
    pub last_used_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_applications: usize,
    pub active_applications: usize,
    pub completed_applications: usize,
    pub recent_activity_count: usize,
    /// Mean days since application date, terminal records included.
    pub average_time_in_pipeline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSummary {
    pub oldest_application: NaiveDate,
    pub newest_application: NaiveDate,
    pub total_timespan_days: i64,
    pub average_applications_per_month: f64,
    pub most_active_month: String,
    pub least_active_month: String,
}

impl TimelineSummary {
    /// Empty-state summary. Both dates are set to `today` as a sentinel, not an
    /// observed application date.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            oldest_application: today,
            newest_application: today,
            total_timespan_days: 0,
            average_applications_per_month: 0.0,
            most_active_month: String::new(),
            least_active_month: String::new(),
        }
    }
}

/// Conversion figures for one slice (company, resume or period).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupConversion {
    pub group: String,
    pub total_applications: usize,
    pub conversion_rates: ConversionRates,
    pub final_outcomes: Vec<StatusDistribution>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub total_applications: usize,
    pub best_converting_company: String,
    pub best_converting_resume: String,
    pub best_converting_period: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumePerformanceSummary {
    pub total_resumes: usize,
    pub most_used_resume: String,
    pub best_performing_resume: String,
    pub average_usage_per_resume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCount {
    pub period: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakPeriod {
    pub rank: usize,
    pub period: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VelocityMetrics {
    pub applications_per_week: f64,
    pub applications_per_month: f64,
    pub total_timespan_days: i64,
    pub velocity_trend: Vec<PeriodCount>,
}

// ────────────────────────────────────────────────────────────────────────────
// View DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineAnalytics {
    pub status_distribution: Vec<StatusDistribution>,
    pub applications_trends: Vec<ApplicationsTrend>,
    pub summary: PipelineSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumePerformanceAnalytics {
    pub resume_metrics: Vec<ResumeMetrics>,
    pub summary: ResumePerformanceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineAnalytics {
    pub velocity: VelocityMetrics,
    pub peak_application_periods: Vec<PeakPeriod>,
    pub summary: TimelineSummary,
}

impl TimelineAnalytics {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            velocity: VelocityMetrics::default(),
            peak_application_periods: Vec::new(),
            summary: TimelineSummary::empty(today),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionAnalytics {
    pub overall_conversion: ConversionRates,
    pub conversion_by_company: Vec<GroupConversion>,
    pub conversion_by_resume: Vec<GroupConversion>,
    pub conversion_by_period: Vec<GroupConversion>,
    pub summary: ConversionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteAnalytics {
    pub pipeline: PipelineAnalytics,
    pub resume_performance: ResumePerformanceAnalytics,
    pub timeline: TimelineAnalytics,
    pub conversion: ConversionAnalytics,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            "phone_screen".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::PhoneScreen)
        );
        assert_eq!(
            " OFFER_ACCEPTED ".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::OfferAccepted)
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "GHOSTED".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown application status 'GHOSTED'");
    }

    #[test]
    fn test_status_order_follows_funnel() {
        assert!(ApplicationStatus::Applied < ApplicationStatus::PhoneScreen);
        assert!(ApplicationStatus::OfferReceived < ApplicationStatus::OfferAccepted);
        assert!(ApplicationStatus::OfferAccepted < ApplicationStatus::Declined);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&ApplicationStatus::TechnicalInterview).unwrap();
        assert_eq!(json, "\"TECHNICAL_INTERVIEW\"");
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = ApplicationStatus::ALL
            .into_iter()
            .filter(ApplicationStatus::is_terminal)
            .collect();
        assert_eq!(
            terminal,
            vec![
                ApplicationStatus::OfferAccepted,
                ApplicationStatus::Declined,
                ApplicationStatus::Rejected
            ]
        );
    }

    #[test]
    fn test_time_period_parse() {
        assert_eq!("Weekly".parse::<TimePeriod>(), Ok(TimePeriod::Weekly));
        assert!("yearly".parse::<TimePeriod>().is_err());
    }

    #[test]
    fn test_inverted_date_range_is_void() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(DateRange::new(a, b).is_none());
        assert!(DateRange::new(b, a).is_some());
        assert!(DateRange::new(a, a).is_some());
    }
}
