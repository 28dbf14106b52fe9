//! Dashboard configuration

use crate::{ConfigError, LabTrackResult};
use serde::{Deserialize, Serialize};

/// Tunable parameters for the dashboard's charts and panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of trailing windows in the experiments timeline chart.
    pub timeline_windows: usize,
    /// Length of each experiments-timeline window, in days.
    pub timeline_window_days: i64,
    /// Number of trailing windows in the samples-over-time chart.
    pub monthly_windows: usize,
    /// Length of each samples-over-time window, in days.
    pub monthly_window_days: i64,
    /// Maximum entries shown in the recent-activity panel.
    pub recent_activity_limit: usize,
    /// Samples expiring within this many days raise an alert.
    pub expiry_warning_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timeline_windows: 12,
            timeline_window_days: 7,
            monthly_windows: 12,
            monthly_window_days: 30,
            recent_activity_limit: 5,
            expiry_warning_days: 7,
        }
    }
}

impl DashboardConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> LabTrackResult<()> {
        if self.timeline_windows == 0 {
            return Err(invalid("timeline_windows", "0", "must be positive").into());
        }
        if self.timeline_window_days <= 0 {
            return Err(invalid(
                "timeline_window_days",
                &self.timeline_window_days.to_string(),
                "must be positive",
            )
            .into());
        }
        if self.monthly_windows == 0 {
            return Err(invalid("monthly_windows", "0", "must be positive").into());
        }
        if self.monthly_window_days <= 0 {
            return Err(invalid(
                "monthly_window_days",
                &self.monthly_window_days.to_string(),
                "must be positive",
            )
            .into());
        }
        if self.recent_activity_limit == 0 {
            return Err(invalid("recent_activity_limit", "0", "must be positive").into());
        }
        if self.expiry_warning_days < 0 {
            return Err(invalid(
                "expiry_warning_days",
                &self.expiry_warning_days.to_string(),
                "must not be negative",
            )
            .into());
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
