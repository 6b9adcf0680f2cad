use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::analytics::service::AnalyticsSettings;

/// Accepted bounds for the analytics day windows.
const WINDOW_DAYS: std::ops::RangeInclusive<i64> = 1..=3650;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub analytics: AnalyticsSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = AnalyticsSettings::default();
        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analytics: AnalyticsSettings {
                default_range_days: window_days(
                    "ANALYTICS_DEFAULT_RANGE_DAYS",
                    env_or("ANALYTICS_DEFAULT_RANGE_DAYS", defaults.default_range_days)?,
                )?,
                recent_activity_days: window_days(
                    "ANALYTICS_RECENT_ACTIVITY_DAYS",
                    env_or("ANALYTICS_RECENT_ACTIVITY_DAYS", defaults.recent_activity_days)?,
                )?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `key` if set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

fn window_days(key: &str, days: i64) -> Result<i64> {
    ensure!(
        WINDOW_DAYS.contains(&days),
        "Environment variable '{key}' must be between {} and {} days, got {days}",
        WINDOW_DAYS.start(),
        WINDOW_DAYS.end()
    );
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<u16>("PORT", " 9090 ").unwrap(), 9090);
        assert_eq!(parse_value::<i64>("ANALYTICS_DEFAULT_RANGE_DAYS", "30").unwrap(), 30);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: i64 = env_or("JOBTRACK_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_window_days_accepts_bounds() {
        assert_eq!(window_days("ANALYTICS_DEFAULT_RANGE_DAYS", 1).unwrap(), 1);
        assert_eq!(window_days("ANALYTICS_DEFAULT_RANGE_DAYS", 90).unwrap(), 90);
        assert_eq!(window_days("ANALYTICS_DEFAULT_RANGE_DAYS", 3650).unwrap(), 3650);
    }

    #[test]
    fn test_window_days_rejects_out_of_range() {
        for days in [-30, 0, 3651, 200_000_000_000_000] {
            let err = window_days("ANALYTICS_RECENT_ACTIVITY_DAYS", days).unwrap_err();
            assert!(err.to_string().contains("ANALYTICS_RECENT_ACTIVITY_DAYS"));
        }
    }

    #[test]
    fn test_default_settings_are_within_bounds() {
        let defaults = AnalyticsSettings::default();
        assert!(WINDOW_DAYS.contains(&defaults.default_range_days));
        assert!(WINDOW_DAYS.contains(&defaults.recent_activity_days));
    }
}
