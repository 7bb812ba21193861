//! Daily reminder to record transactions
//!
//! Nothing is scheduled with the OS. The CLI and TUI ask this service whether
//! the reminder is due and show it themselves.

use chrono::{Duration, NaiveDateTime};

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::storage::Storage;

pub struct ReminderService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ReminderService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// When the reminder fires next, or `None` if it is off
    pub fn next_reminder(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.settings.reminder.enabled {
            return None;
        }

        let today = now.date().and_time(self.settings.reminder.time);
        if now < today {
            Some(today)
        } else {
            Some(today + Duration::days(1))
        }
    }

    /// Due when enabled, past today's reminder time, and nothing has been
    /// recorded today
    pub fn should_notify(&self, now: NaiveDateTime) -> ExpenseResult<bool> {
        let reminder = &self.settings.reminder;
        if !reminder.enabled || now.time() < reminder.time {
            return Ok(false);
        }

        Ok(!self.storage.transactions.has_transaction_on(now.date())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountId, CategoryId, Money, Transaction, TransactionType};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn setup(enabled: bool) -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();
        settings.reminder.enabled = enabled;
        settings.reminder.time = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        (temp_dir, storage, settings)
    }

    #[test]
    fn test_next_reminder() {
        let (_temp_dir, storage, settings) = setup(true);
        let service = ReminderService::new(&storage, &settings);

        assert_eq!(service.next_reminder(at(17, 9, 0)), Some(at(17, 20, 0)));
        assert_eq!(service.next_reminder(at(17, 20, 0)), Some(at(18, 20, 0)));
        assert_eq!(service.next_reminder(at(31, 23, 0)), Some(
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap().and_hms_opt(20, 0, 0).unwrap()
        ));
    }

    #[test]
    fn test_disabled_reminder() {
        let (_temp_dir, storage, settings) = setup(false);
        let service = ReminderService::new(&storage, &settings);

        assert_eq!(service.next_reminder(at(17, 9, 0)), None);
        assert!(!service.should_notify(at(17, 21, 0)).unwrap());
    }

    #[test]
    fn test_should_notify_until_something_is_recorded() {
        let (_temp_dir, storage, settings) = setup(true);
        let service = ReminderService::new(&storage, &settings);

        assert!(!service.should_notify(at(17, 19, 59)).unwrap());
        assert!(service.should_notify(at(17, 20, 0)).unwrap());

        storage
            .transactions
            .upsert(Transaction::new(
                AccountId::new(),
                CategoryId::new(),
                TransactionType::Expense,
                Money::from_cents(100),
                at(17, 0, 0).date(),
            ))
            .unwrap();

        assert!(!service.should_notify(at(17, 21, 0)).unwrap());
        assert!(service.should_notify(at(18, 21, 0)).unwrap());
    }
}
