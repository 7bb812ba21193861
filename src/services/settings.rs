//! Settings service
//!
//! Every setter validates, persists `config.json` immediately and writes a
//! settings entry to the audit log.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveTime;
use serde::Serialize;

use crate::audit::EntityType;
use crate::config::{FilterSettings, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    AccountId, CategoryId, Currency, CurrencyPosition, DateRange, DateRangeType, TransactionType,
};
use crate::storage::Storage;

/// Service for reading and changing persisted settings
pub struct SettingsService<'a> {
    storage: &'a Storage,
    settings: &'a mut Settings,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a mut Settings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &Settings {
        &*self.settings
    }

    /// Apply `change` to the settings, save, and audit the named section
    fn commit<T, F>(
        &mut self,
        section: &str,
        project: fn(&Settings) -> T,
        change: F,
    ) -> ExpenseResult<()>
    where
        T: Serialize,
        F: FnOnce(&mut Settings),
    {
        let before = project(&*self.settings);
        change(&mut *self.settings);
        let after = project(&*self.settings);

        self.settings.save(self.storage.paths())?;
        self.storage
            .log_update(EntityType::Settings, section, None, &before, &after)?;

        tracing::debug!(section, "settings updated");
        Ok(())
    }

    pub fn set_date_range_type(&mut self, range_type: DateRangeType) -> ExpenseResult<()> {
        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.date_range_type = range_type;
        })
    }

    /// Store a custom range and select it
    pub fn set_custom_range(
        &mut self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> ExpenseResult<()> {
        let range = DateRange::new(start, end)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.custom_range = Some(range);
            s.filter.date_range_type = DateRangeType::Custom;
        })
    }

    /// Select accounts; an empty list means all accounts
    pub fn set_accounts(&mut self, accounts: Vec<AccountId>) -> ExpenseResult<()> {
        for id in &accounts {
            if !self.storage.accounts.exists(*id)? {
                return Err(ExpenseError::account_not_found(id.to_string()));
            }
        }
        let accounts = dedup(accounts);

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.accounts = accounts;
        })
    }

    /// Select categories; an empty list means all categories
    pub fn set_categories(&mut self, categories: Vec<CategoryId>) -> ExpenseResult<()> {
        for id in &categories {
            if self.storage.categories.get(*id)?.is_none() {
                return Err(ExpenseError::category_not_found(id.to_string()));
            }
        }
        let categories = dedup(categories);

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.categories = categories;
        })
    }

    /// Select transaction types; an empty list means both
    pub fn set_transaction_types(&mut self, types: Vec<TransactionType>) -> ExpenseResult<()> {
        let types = dedup(types);
        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.transaction_types = types;
        })
    }

    /// Replace the whole filter in one save
    pub fn set_filter(&mut self, filter: FilterSettings) -> ExpenseResult<()> {
        for id in &filter.accounts {
            if !self.storage.accounts.exists(*id)? {
                return Err(ExpenseError::account_not_found(id.to_string()));
            }
        }
        for id in &filter.categories {
            if self.storage.categories.get(*id)?.is_none() {
                return Err(ExpenseError::category_not_found(id.to_string()));
            }
        }
        let filter = FilterSettings {
            accounts: dedup(filter.accounts),
            categories: dedup(filter.categories),
            transaction_types: dedup(filter.transaction_types),
            ..filter
        };

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter = filter;
        })
    }

    /// Drop account, category and type selections; the date range is kept
    pub fn clear_filters(&mut self) -> ExpenseResult<()> {
        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.accounts.clear();
            s.filter.categories.clear();
            s.filter.transaction_types.clear();
        })
    }

    /// Turn the reminder on or off, optionally moving its time
    pub fn set_reminder(&mut self, enabled: bool, time: Option<NaiveTime>) -> ExpenseResult<()> {
        self.commit("reminder", |s| s.reminder, |s| {
            s.reminder.enabled = enabled;
            if let Some(time) = time {
                s.reminder.time = time;
            }
        })
    }

    pub fn set_currency(&mut self, symbol: &str, position: CurrencyPosition) -> ExpenseResult<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ExpenseError::Validation(
                "Currency symbol cannot be empty".into(),
            ));
        }
        if symbol.chars().count() > 5 {
            return Err(ExpenseError::Validation(
                "Currency symbol is too long (max 5 characters)".into(),
            ));
        }

        let currency = Currency::new(symbol, position);
        self.commit("currency", |s| s.currency.clone(), |s| {
            s.currency = currency;
        })
    }

    /// Account preselected for new transactions; `None` clears it
    pub fn set_default_account(&mut self, account: Option<AccountId>) -> ExpenseResult<()> {
        if let Some(id) = account {
            if !self.storage.accounts.exists(id)? {
                return Err(ExpenseError::account_not_found(id.to_string()));
            }
        }

        self.commit("default_account", |s| s.default_account, |s| {
            s.default_account = account;
        })
    }

    pub fn set_date_format(&mut self, format: &str) -> ExpenseResult<()> {
        if format.trim().is_empty()
            || StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
        {
            return Err(ExpenseError::Validation(format!(
                "Invalid date format '{}'",
                format
            )));
        }

        let format = format.to_string();
        self.commit("date_format", |s| s.date_format.clone(), |s| {
            s.date_format = format;
        })
    }

    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub fn set_first_day_of_week(&mut self, day: u8) -> ExpenseResult<()> {
        if day > 6 {
            return Err(ExpenseError::Validation(
                "First day of week must be between 0 (Sunday) and 6 (Saturday)".into(),
            ));
        }

        self.commit("first_day_of_week", |s| s.first_day_of_week, |s| {
            s.first_day_of_week = day;
        })
    }

    /// Forget references to a deleted account
    pub fn forget_account(&mut self, id: AccountId) -> ExpenseResult<()> {
        if self.settings.default_account != Some(id) && !self.settings.filter.accounts.contains(&id)
        {
            return Ok(());
        }

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.accounts.retain(|a| *a != id);
            if s.default_account == Some(id) {
                s.default_account = None;
            }
        })
    }

    /// Forget references to a deleted category
    pub fn forget_category(&mut self, id: CategoryId) -> ExpenseResult<()> {
        if !self.settings.filter.categories.contains(&id) {
            return Ok(());
        }

        self.commit("filter", |s| s.filter.clone(), |s| {
            s.filter.categories.retain(|c| *c != id);
        })
    }
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::AppPaths;
    use crate::models::{Account, AccountType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_setters_persist_and_audit() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();

        SettingsService::new(&storage, &mut settings)
            .set_date_range_type(DateRangeType::ThisYear)
            .unwrap();

        let loaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(loaded.filter.date_range_type, DateRangeType::ThisYear);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Settings);
        assert_eq!(entries[0].operation, Operation::Update);
        assert!(entries[0]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("date_range_type"));
    }

    #[test]
    fn test_custom_range() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 7).unwrap();

        let mut service = SettingsService::new(&storage, &mut settings);
        assert!(service.set_custom_range(end, start).unwrap_err().is_validation());
        service.set_custom_range(start, end).unwrap();

        assert_eq!(settings.filter.date_range_type, DateRangeType::Custom);
        assert_eq!(settings.filter.custom_range.unwrap().end, end);
    }

    #[test]
    fn test_account_selection_and_clear() {
        let (_temp_dir, storage) = create_test_storage();
        let account = Account::new("Cash", AccountType::Cash);
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        let mut settings = Settings::default();
        let mut service = SettingsService::new(&storage, &mut settings);

        assert!(service
            .set_accounts(vec![AccountId::new()])
            .unwrap_err()
            .is_not_found());
        service.set_accounts(vec![id, id]).unwrap();
        service
            .set_transaction_types(vec![TransactionType::Expense])
            .unwrap();
        assert_eq!(service.settings().filter.accounts, vec![id]);
        assert!(service.settings().filter.is_filter_enabled());

        service.clear_filters().unwrap();
        assert!(!settings.filter.is_filter_enabled());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut service = SettingsService::new(&storage, &mut settings);

        assert!(service
            .set_currency("", CurrencyPosition::Prefix)
            .unwrap_err()
            .is_validation());
        assert!(service.set_date_format("%Q").unwrap_err().is_validation());
        assert!(service.set_first_day_of_week(7).unwrap_err().is_validation());

        service.set_currency("€", CurrencyPosition::Suffix).unwrap();
        service.set_date_format("%Y-%m-%d").unwrap();
        assert_eq!(settings.currency.symbol, "€");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(storage.audit().read_all().unwrap().len() == 2);
    }

    #[test]
    fn test_reminder() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let time = NaiveTime::from_hms_opt(21, 30, 0).unwrap();

        SettingsService::new(&storage, &mut settings)
            .set_reminder(true, Some(time))
            .unwrap();

        assert!(settings.reminder.enabled);
        assert_eq!(settings.reminder.time, time);
    }

    #[test]
    fn test_forget_account() {
        let (_temp_dir, storage) = create_test_storage();
        let account = Account::new("Cash", AccountType::Cash);
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        let mut settings = Settings::default();
        let mut service = SettingsService::new(&storage, &mut settings);
        service.set_default_account(Some(id)).unwrap();
        service.set_accounts(vec![id]).unwrap();
        service.forget_account(id).unwrap();

        assert_eq!(settings.default_account, None);
        assert!(settings.filter.accounts.is_empty());
    }
}
