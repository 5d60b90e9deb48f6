//! User settings for bizdash
//!
//! Holds the allocation policy, the savings heuristics and display
//! preferences. Settings are loaded by the shell and passed explicitly into
//! engine calls; nothing in the engine reads them from ambient state.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::BizdashPaths;
use crate::error::FinanceError;
use crate::models::AllocationPolicy;
use crate::reports::savings::SavingsHeuristics;

/// User settings for bizdash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// The single accepted date format for entry and import (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Income allocation policy
    #[serde(default)]
    pub allocation: AllocationPolicy,

    /// Savings suggestion tunables
    #[serde(default)]
    pub savings: SavingsHeuristics,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            allocation: AllocationPolicy::default(),
            savings: SavingsHeuristics::default(),
        }
    }
}

/// A date format must be valid strftime that writes a date and reads it back
fn check_date_format(format: &str) -> Result<(), FinanceError> {
    let invalid = || {
        FinanceError::Config(format!(
            "date_format '{}' must be a strftime pattern with year, month and day",
            format
        ))
    };

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or_else(invalid)?;
    let mut written = String::new();
    write!(written, "{}", sample.format(format)).map_err(|_| invalid())?;
    match NaiveDate::parse_from_str(&written, format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(invalid()),
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BizdashPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            check_date_format(&settings.date_format)?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BizdashPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.allocation, AllocationPolicy::default());
        assert_eq!(settings.savings.min_annual_savings, Money::from_dollars(50));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BizdashPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.allocation = AllocationPolicy::default().with_tax_rate(0.30).unwrap();
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.allocation.tax_rate(), 0.30);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BizdashPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol":"£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.allocation, AllocationPolicy::default());
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BizdashPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"allocation":{"tax_rate":0.4,"owner_pay_amount":300000,"owner_pay_interval_days":0,"reinvestment_rate":0.2}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BizdashPaths::with_base_dir(temp_dir.path().to_path_buf());

        for format in ["%Q", "%H:%M", "%Y-%m"] {
            std::fs::write(
                paths.settings_file(),
                format!(r#"{{"date_format":"{}"}}"#, format),
            )
            .unwrap();
            let err = Settings::load_or_create(&paths).unwrap_err();
            assert!(matches!(err, FinanceError::Config(_)), "{}", format);
        }

        std::fs::write(paths.settings_file(), r#"{"date_format":"%m/%d/%Y"}"#).unwrap();
        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%m/%d/%Y");
    }
}
