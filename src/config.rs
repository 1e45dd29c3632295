//! Engine configuration: resources, business hours, thresholds.
//!
//! Loaded from a TOML file by the hosting service; every field has a
//! default so an empty file is a valid configuration (with no resources).

use std::path::Path;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

fn default_timezone() -> Tz {
    chrono_tz::Asia::Bangkok
}

fn default_business_start() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn default_business_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap()
}

fn default_significant_gap_minutes() -> i64 {
    120
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

/// The daily window over which coverage is measured.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BusinessHours {
    #[serde(default = "default_business_start")]
    pub start: NaiveTime,
    #[serde(default = "default_business_end")]
    pub end: NaiveTime,
}

impl Default for BusinessHours {
    fn default() -> Self {
        BusinessHours {
            start: default_business_start(),
            end: default_business_end(),
        }
    }
}

impl BusinessHours {
    /// Width of the window, i.e. the minutes a fully-covered day has.
    pub fn required_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.start >= self.end {
            return Err(EngineError::Config(format!(
                "Business hours start {} is not before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// One bookable resource and its external calendar binding.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    /// Logical name used throughout the platform, e.g. "Bay 1".
    pub name: String,
    /// External calendar/source identifier the events are fetched from.
    pub calendar_id: String,
    /// Label the hosted database API knows this resource by.
    pub api_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// The single timezone all interval arithmetic happens in.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    #[serde(default)]
    pub business_hours: BusinessHours,

    /// A day is flagged when its gap minutes exceed this total.
    #[serde(default = "default_significant_gap_minutes")]
    pub significant_gap_minutes: i64,

    /// Per-resource event fetch timeout.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            timezone: default_timezone(),
            business_hours: BusinessHours::default(),
            significant_gap_minutes: default_significant_gap_minutes(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            resources: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| EngineError::Config(e.to_string()))?;
        config.business_hours.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config.timezone, chrono_tz::Asia::Bangkok);
        assert_eq!(config.business_hours.start, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(config.business_hours.end, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(config.significant_gap_minutes, 120);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let config = EngineConfig::from_toml(
            r#"
            timezone = "Asia/Bangkok"
            significant_gap_minutes = 90
            fetch_timeout_secs = 5

            [business_hours]
            start = "10:00:00"
            end = "22:00:00"

            [[resources]]
            name = "Bay 1"
            calendar_id = "bay1@group.calendar.google.com"
            api_label = "Bay 1 (Bar)"

            [[resources]]
            name = "Bay 2"
            calendar_id = "bay2@group.calendar.google.com"
            api_label = "Bay 2"
            "#,
        )
        .unwrap();

        assert_eq!(config.significant_gap_minutes, 90);
        assert_eq!(config.business_hours.required_minutes(), 720);
        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.resources[0].name, "Bay 1");
        assert_eq!(config.resources[1].api_label, "Bay 2");
    }

    #[test]
    fn test_inverted_business_hours_rejected() {
        let result = EngineConfig::from_toml(
            r#"
            [business_hours]
            start = "22:00:00"
            end = "10:00:00"
            "#,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_default_window_is_thirteen_hours() {
        assert_eq!(BusinessHours::default().required_minutes(), 780);
    }
}
