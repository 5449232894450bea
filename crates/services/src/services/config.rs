//! Advisor configuration, read from a TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use models::settings::{
    DEFAULT_MARGIN_WARNING_THRESHOLD, DEFAULT_WEEKLY_CAPACITY_HOURS, SettingsSnapshot,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::{
    advisor_alerts::DEFAULT_CURRENCY, overdue_payments::DEFAULT_OVERDUE_AFTER_DAYS,
    task_triage::DEFAULT_URGENT_TASK_LIMIT,
};

const CONFIG_DIR_NAME: &str = "damelie-pa";
const CONFIG_FILE_NAME: &str = "advisor.toml";

/// Upper bound for `payment_overdue_days` (100 years)
pub const MAX_PAYMENT_OVERDUE_DAYS: i64 = 36_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Used when the stored settings have no capacity
    pub default_weekly_capacity_hours: f64,
    /// Used when the stored settings have no margin threshold
    pub default_margin_warning_threshold: f64,
    /// Invoices unpaid for longer than this are handed to the advisor
    pub payment_overdue_days: i64,
    pub urgent_task_limit: usize,
    /// Fallback currency when the stored settings have none
    pub currency: String,
    /// Refuse to generate alerts from invalid snapshots instead of clamping them
    pub strict_validation: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            default_weekly_capacity_hours: DEFAULT_WEEKLY_CAPACITY_HOURS,
            default_margin_warning_threshold: DEFAULT_MARGIN_WARNING_THRESHOLD,
            payment_overdue_days: DEFAULT_OVERDUE_AFTER_DAYS,
            urgent_task_limit: DEFAULT_URGENT_TASK_LIMIT,
            currency: DEFAULT_CURRENCY.to_string(),
            strict_validation: false,
        }
    }
}

impl AdvisorConfig {
    /// `<config dir>/damelie-pa/advisor.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when it exists, or fall back
    /// to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::load_from(&path),
                None => {
                    debug!("No advisor config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "Loaded advisor config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.default_weekly_capacity_hours;
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_weekly_capacity_hours must be positive, got {}",
                capacity
            )));
        }
        if !(0.0..=100.0).contains(&self.default_margin_warning_threshold) {
            return Err(ConfigError::Invalid(format!(
                "default_margin_warning_threshold must be between 0 and 100, got {}",
                self.default_margin_warning_threshold
            )));
        }
        if !(0..=MAX_PAYMENT_OVERDUE_DAYS).contains(&self.payment_overdue_days) {
            return Err(ConfigError::Invalid(format!(
                "payment_overdue_days must be between 0 and {}, got {}",
                MAX_PAYMENT_OVERDUE_DAYS, self.payment_overdue_days
            )));
        }
        Ok(())
    }

    /// Settings used when the stored record leaves a value unset
    pub fn fallback_settings(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            weekly_capacity_hours: self.default_weekly_capacity_hours,
            margin_warning_threshold: self.default_margin_warning_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("payment_overdue_days = 14\nstrict_validation = true\n");
        let config = AdvisorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.payment_overdue_days, 14);
        assert!(config.strict_validation);
        assert_eq!(config.default_weekly_capacity_hours, 40.0);
        assert_eq!(config.currency, "EUR");
    }

    #[test]
    fn test_rejects_bad_values() {
        let file = write_config("default_weekly_capacity_hours = 0.0\n");
        let err = AdvisorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let file = write_config("default_margin_warning_threshold = 120.0\n");
        assert!(AdvisorConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_overdue_window() {
        let file = write_config("payment_overdue_days = 1000000000\n");
        let err = AdvisorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("payment_overdue_days"));

        let at_limit = AdvisorConfig {
            payment_overdue_days: MAX_PAYMENT_OVERDUE_DAYS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_reports_parse_errors_with_path() {
        let file = write_config("payment_overdue_days = \"soon\"\n");
        let err = AdvisorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file_is_an_error_when_named() {
        let dir = tempfile::tempdir().unwrap();
        let err = AdvisorConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_fallback_settings() {
        let config = AdvisorConfig {
            default_weekly_capacity_hours: 30.0,
            ..Default::default()
        };
        let settings = config.fallback_settings();
        assert_eq!(settings.weekly_capacity_hours, 30.0);
        assert_eq!(settings.margin_warning_threshold, 15.0);
    }
}
