use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_WEEKLY_CAPACITY_HOURS: f64 = 40.0;
pub const DEFAULT_MARGIN_WARNING_THRESHOLD: f64 = 15.0;

/// Settings as stored by the studio's settings page
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SystemSettings {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default)]
    pub working_hours_per_day: Option<f64>,
    #[serde(default)]
    pub weekly_capacity_hours: Option<f64>,
    #[serde(default)]
    pub margin_warning_threshold: Option<f64>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            user_name: None,
            default_currency: default_currency(),
            working_hours_per_day: None,
            weekly_capacity_hours: None,
            margin_warning_threshold: None,
        }
    }
}

impl SystemSettings {
    /// Build the advisor's view of these settings.
    ///
    /// Missing or zero values fall back to the supplied defaults, the same way the
    /// dashboard treats an unset field.
    pub fn snapshot(&self, fallback: &SettingsSnapshot) -> SettingsSnapshot {
        SettingsSnapshot {
            weekly_capacity_hours: non_zero_or(
                self.weekly_capacity_hours,
                fallback.weekly_capacity_hours,
            ),
            margin_warning_threshold: non_zero_or(
                self.margin_warning_threshold,
                fallback.margin_warning_threshold,
            ),
        }
    }
}

fn non_zero_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => fallback,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
pub struct SettingsSnapshot {
    /// Hours per week available for active project work
    pub weekly_capacity_hours: f64,
    /// Margin percentage below which a project is flagged
    pub margin_warning_threshold: f64,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            weekly_capacity_hours: DEFAULT_WEEKLY_CAPACITY_HOURS,
            margin_warning_threshold: DEFAULT_MARGIN_WARNING_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_stored_values() {
        let settings = SystemSettings {
            weekly_capacity_hours: Some(32.0),
            margin_warning_threshold: Some(20.0),
            ..Default::default()
        };
        let snapshot = settings.snapshot(&SettingsSnapshot::default());
        assert_eq!(snapshot.weekly_capacity_hours, 32.0);
        assert_eq!(snapshot.margin_warning_threshold, 20.0);
    }

    #[test]
    fn test_snapshot_falls_back_on_missing_or_zero() {
        let settings = SystemSettings {
            weekly_capacity_hours: Some(0.0),
            ..Default::default()
        };
        let snapshot = settings.snapshot(&SettingsSnapshot::default());
        assert_eq!(snapshot, SettingsSnapshot::default());
    }

    #[test]
    fn test_deserialize_empty_settings() {
        let settings: SystemSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.default_currency, "EUR");
        assert!(settings.weekly_capacity_hours.is_none());
    }
}
