//! User settings
//!
//! Holds display preferences, the reminder, and the active transaction filter
//! (date range type, selected accounts, categories and transaction types).
//! Settings are persisted as `config.json` in the base directory.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::ExpenseError;
use crate::models::{AccountId, CategoryId, Currency, DateRange, DateRangeType, TransactionType};

/// The persisted transaction filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSettings {
    /// Which date range transactions are shown for
    #[serde(default)]
    pub date_range_type: DateRangeType,

    /// Range used when `date_range_type` is `Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_range: Option<DateRange>,

    /// Selected accounts; empty means all accounts
    #[serde(default)]
    pub accounts: Vec<AccountId>,

    /// Selected categories; empty means all categories
    #[serde(default)]
    pub categories: Vec<CategoryId>,

    /// Selected transaction types; empty means all types
    #[serde(default)]
    pub transaction_types: Vec<TransactionType>,
}

impl FilterSettings {
    /// A filter is enabled when any account, category or type is selected.
    /// The date range is tracked separately and does not count.
    pub fn is_filter_enabled(&self) -> bool {
        !self.accounts.is_empty()
            || !self.categories.is_empty()
            || !self.transaction_types.is_empty()
    }
}

/// Daily reminder to record transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Whether the reminder is on
    #[serde(default)]
    pub enabled: bool,

    /// Time of day the reminder fires
    #[serde(default = "default_reminder_time")]
    pub time: NaiveTime,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            time: default_reminder_time(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency used when formatting amounts
    #[serde(default)]
    pub currency: Currency,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,

    /// Daily reminder
    #[serde(default)]
    pub reminder: ReminderSettings,

    /// Active transaction filter
    #[serde(default)]
    pub filter: FilterSettings,

    /// Account preselected when adding transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account: Option<AccountId>,

    /// Whether default categories and accounts have been created
    #[serde(default)]
    pub preloaded: bool,

    /// Whether the first-run setup has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_first_day_of_week() -> u8 {
    1 // Monday
}

fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
            reminder: ReminderSettings::default(),
            filter: FilterSettings::default(),
            default_account: None,
            preloaded: false,
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, ExpenseError> {
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
    pub fn save(&self, paths: &AppPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ExpenseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyPosition;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.filter.date_range_type, DateRangeType::ThisMonth);
        assert!(!settings.filter.is_filter_enabled());
        assert!(!settings.reminder.enabled);
        assert_eq!(settings.reminder.time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(settings.currency.symbol, "$");
    }

    #[test]
    fn test_filter_enabled_by_any_selection() {
        let mut filter = FilterSettings::default();
        filter.date_range_type = DateRangeType::All;
        assert!(!filter.is_filter_enabled());

        filter.transaction_types.push(TransactionType::Income);
        assert!(filter.is_filter_enabled());

        filter.transaction_types.clear();
        filter.categories.push(CategoryId::new());
        assert!(filter.is_filter_enabled());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::ThisYear;
        settings.reminder.enabled = true;
        settings.currency = Currency::new("€", CurrencyPosition::Suffix);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.filter.date_range_type, DateRangeType::ThisYear);
        assert!(loaded.reminder.enabled);
        assert_eq!(loaded.currency.symbol, "€");
        assert_eq!(loaded.currency.position, CurrencyPosition::Suffix);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%d/%m/%Y");
        assert_eq!(settings.first_day_of_week, 1);
    }
}
