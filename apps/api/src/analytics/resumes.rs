use crate::analytics::funnel::conversion_rates;
use crate::analytics::math::{first_max_by, mean, percentage};
use crate::analytics::models::{
    ResumeMetrics, ResumePerformanceAnalytics, ResumePerformanceSummary, ResumeRecord,
};

/// Usage, funnel conversion and offer success rate for one resume version.
pub fn resume_metrics(resume: &ResumeRecord) -> ResumeMetrics {
    let usage_count = resume.applications.len();
    let offers = resume
        .applications
        .iter()
        .filter(|a| a.status.is_offer())
        .count();

    ResumeMetrics {
        resume_id: resume.id,
        version_name: resume.version_name.clone(),
        usage_count,
        conversion_rates: conversion_rates(&resume.applications),
        success_rate: percentage(offers, usage_count),
        last_used_date: resume.last_used_date,
    }
}

pub fn resume_performance(resumes: &[ResumeRecord]) -> ResumePerformanceAnalytics {
    let metrics: Vec<ResumeMetrics> = resumes.iter().map(resume_metrics).collect();

    let most_used_resume = first_max_by(&metrics, |m| m.usage_count as f64)
        .map(|m| m.version_name.clone())
        .unwrap_or_default();
    let best_performing_resume = first_max_by(&metrics, |m| m.success_rate)
        .map(|m| m.version_name.clone())
        .unwrap_or_default();
    let total_usage: usize = metrics.iter().map(|m| m.usage_count).sum();

    let summary = ResumePerformanceSummary {
        total_resumes: metrics.len(),
        most_used_resume,
        best_performing_resume,
        average_usage_per_resume: mean(total_usage as f64, metrics.len()),
    };

    ResumePerformanceAnalytics {
        resume_metrics: metrics,
        summary,
    }
}
