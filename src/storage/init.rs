//! Storage initialization
//!
//! First-run setup: seeds the default expense and income categories and a
//! `Cash` account, then marks the settings as preloaded.

use crate::config::Settings;
use crate::error::ExpenseError;
use crate::models::{Account, AccountType, Category, DEFAULT_CATEGORIES};

use super::Storage;

/// What a call to [`initialize_storage`] created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub categories_created: usize,
    pub account_created: bool,
}

/// Seed default data unless the settings say it was already done
///
/// Existing categories or accounts are never overwritten; seeding only fills
/// an empty store.
pub fn initialize_storage(
    storage: &Storage,
    settings: &mut Settings,
) -> Result<InitSummary, ExpenseError> {
    storage.paths().ensure_directories()?;

    let mut summary = InitSummary::default();
    if settings.preloaded {
        return Ok(summary);
    }

    if storage.categories.count()? == 0 {
        for default in DEFAULT_CATEGORIES {
            storage.categories.upsert(Category::with_style(
                default.name,
                default.category_type,
                default.icon,
                default.color,
            ))?;
            summary.categories_created += 1;
        }
        storage.categories.save()?;
    }

    if storage.accounts.count()? == 0 {
        let cash = Account::new("Cash", AccountType::Cash);
        settings.default_account = Some(cash.id);
        storage.accounts.upsert(cash)?;
        storage.accounts.save()?;
        summary.account_created = true;
    }

    settings.preloaded = true;
    settings.save(storage.paths())?;

    tracing::info!(
        categories = summary.categories_created,
        account = summary.account_created,
        "initialized storage"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppPaths;
    use crate::models::CategoryType;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_initialize_seeds_defaults() {
        let (_temp_dir, storage) = setup();
        let mut settings = Settings::default();

        let summary = initialize_storage(&storage, &mut settings).unwrap();

        assert_eq!(summary.categories_created, DEFAULT_CATEGORIES.len());
        assert!(summary.account_created);
        assert!(settings.preloaded);
        assert!(storage.is_initialized());
        assert!(!storage
            .categories
            .get_by_type(CategoryType::Income)
            .unwrap()
            .is_empty());

        let cash = storage.accounts.get_by_name("Cash").unwrap().unwrap();
        assert_eq!(settings.default_account, Some(cash.id));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_temp_dir, storage) = setup();
        let mut settings = Settings::default();

        initialize_storage(&storage, &mut settings).unwrap();
        let second = initialize_storage(&storage, &mut settings).unwrap();

        assert_eq!(second, InitSummary::default());
        assert_eq!(storage.accounts.count().unwrap(), 1);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let (_temp_dir, storage) = setup();
        storage
            .categories
            .upsert(Category::new("Custom", CategoryType::Expense))
            .unwrap();

        let mut settings = Settings::default();
        let summary = initialize_storage(&storage, &mut settings).unwrap();

        assert_eq!(summary.categories_created, 0);
        assert_eq!(storage.categories.count().unwrap(), 1);
    }
}
