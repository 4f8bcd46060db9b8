//! User settings for expense-cli
//!
//! Manages the AI backend location, budget alert thresholds, and report
//! preferences.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::reports::AlertThresholds;

/// Environment variable that overrides the configured AI backend URL
pub const API_URL_ENV: &str = "EXPENSE_API_URL";

/// Longest accepted backend timeout, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Most months the monthly breakdown may show
pub const MAX_RECENT_MONTHS: u64 = 120;

/// User settings for expense-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the AI backend (including the `/api` prefix)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout for backend calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Budget utilization (%) at which an alert is raised
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold_percent: f64,

    /// Budget utilization (%) at which an alert escalates to danger
    #[serde(default = "default_danger_threshold")]
    pub danger_threshold_percent: f64,

    /// Number of months shown in the monthly breakdown
    #[serde(default = "default_recent_months")]
    pub recent_months: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_alert_threshold() -> f64 {
    75.0
}

fn default_danger_threshold() -> f64 {
    90.0
}

fn default_recent_months() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            alert_threshold_percent: default_alert_threshold(),
            danger_threshold_percent: default_danger_threshold(),
            recent_months: default_recent_months(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// The backend URL to use, honouring the `EXPENSE_API_URL` override
    pub fn effective_api_url(&self) -> String {
        std::env::var(API_URL_ENV).unwrap_or_else(|_| self.api_base_url.clone())
    }

    /// Alert thresholds for budget checks
    pub fn alert_thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            alert: self.alert_threshold_percent,
            danger: self.danger_threshold_percent,
        }
    }

    /// Update a single setting from its CLI key
    ///
    /// Keys: `api-url`, `timeout`, `alert-threshold`, `danger-threshold`,
    /// `recent-months`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ExpenseError> {
        match key {
            "api-url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ExpenseError::Validation(format!(
                        "Invalid API URL: '{}'. It must start with http:// or https://",
                        value
                    )));
                }
                self.api_base_url = url.to_string();
            }
            "timeout" => {
                self.request_timeout_secs = parse_count(key, value, MAX_TIMEOUT_SECS)?;
            }
            "alert-threshold" => {
                let threshold = parse_positive(key, value)?;
                if threshold > self.danger_threshold_percent {
                    return Err(ExpenseError::Validation(format!(
                        "alert-threshold ({}) cannot exceed danger-threshold ({})",
                        threshold, self.danger_threshold_percent
                    )));
                }
                self.alert_threshold_percent = threshold;
            }
            "danger-threshold" => {
                let threshold = parse_positive(key, value)?;
                if threshold < self.alert_threshold_percent {
                    return Err(ExpenseError::Validation(format!(
                        "danger-threshold ({}) cannot be below alert-threshold ({})",
                        threshold, self.alert_threshold_percent
                    )));
                }
                self.danger_threshold_percent = threshold;
            }
            "recent-months" => {
                self.recent_months = parse_count(key, value, MAX_RECENT_MONTHS)? as usize;
            }
            _ => {
                return Err(ExpenseError::Config(format!(
                    "Unknown setting '{}'. Valid keys: api-url, timeout, alert-threshold, danger-threshold, recent-months",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f64, ExpenseError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ExpenseError::Validation(format!(
            "Invalid value for {}: '{}' (expected a positive number)",
            key, value
        ))),
    }
}

/// Whole number in `1..=max`
fn parse_count(key: &str, value: &str, max: u64) -> Result<u64, ExpenseError> {
    match value.trim().parse::<u64>() {
        Ok(v) if (1..=max).contains(&v) => Ok(v),
        _ => Err(ExpenseError::Validation(format!(
            "Invalid value for {}: '{}' (expected a whole number from 1 to {})",
            key, value, max
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8001/api");
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.alert_threshold_percent, 75.0);
        assert_eq!(settings.danger_threshold_percent, 90.0);
        assert_eq!(settings.recent_months, 6);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set("alert-threshold", "80").unwrap();
        settings.set("api-url", "https://expenses.example.com/api/").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.alert_threshold_percent, 80.0);
        assert_eq!(loaded.api_base_url, "https://expenses.example.com/api");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"recent_months": 3}"#).unwrap();
        assert_eq!(settings.recent_months, 3);
        assert_eq!(settings.alert_threshold_percent, 75.0);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("timeout", "0").is_err());
        assert!(settings.set("timeout", "abc").is_err());
        assert!(settings.set("api-url", "localhost:8001").is_err());
        assert!(settings.set("alert-threshold", "95").is_err());
        assert!(settings.set("danger-threshold", "50").is_err());
        assert!(matches!(
            settings.set("colour", "blue"),
            Err(ExpenseError::Config(_))
        ));
    }

    #[test]
    fn test_counts_must_be_whole_and_bounded() {
        let mut settings = Settings::default();

        for bad in ["0.5", "0", "-3", "1e30", "301", "18446744073709551616"] {
            let err = settings.set("timeout", bad).unwrap_err();
            assert!(err.to_string().contains("whole number from 1 to 300"), "{}", bad);
        }
        for bad in ["0.5", "2.9", "0", "121", "100000"] {
            assert!(settings.set("recent-months", bad).is_err(), "{}", bad);
        }
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.recent_months, 6);

        settings.set("timeout", " 300 ").unwrap();
        settings.set("recent-months", "12").unwrap();
        assert_eq!(settings.request_timeout_secs, 300);
        assert_eq!(settings.recent_months, 12);
    }
}
