//! Filtered transaction lists
//!
//! The filter combines four inputs (selected transaction types, categories,
//! accounts and the date range) into exactly one repository query, then
//! narrows the result by category and type in memory.

use chrono::NaiveDate;

use crate::config::{FilterSettings, Settings};
use crate::error::ExpenseResult;
use crate::models::{DateRange, Transaction};
use crate::storage::Storage;

use super::date_range::DateRangeService;

/// The repository query a filter resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterQuery {
    All,
    ByAccounts,
    ByDateRange(DateRange),
    ByAccountsAndDateRange(DateRange),
}

impl FilterQuery {
    /// Pick the query for `filter`; `range` is `None` when all dates are shown
    pub fn select(filter: &FilterSettings, range: Option<DateRange>) -> Self {
        let by_account = filter.is_filter_enabled() && !filter.accounts.is_empty();
        match (range, by_account) {
            (None, true) => Self::ByAccounts,
            (None, false) => Self::All,
            (Some(range), true) => Self::ByAccountsAndDateRange(range),
            (Some(range), false) => Self::ByDateRange(range),
        }
    }
}

/// Run the selected query and apply category/type narrowing
pub fn query_transactions(
    storage: &Storage,
    filter: &FilterSettings,
    range: Option<DateRange>,
) -> ExpenseResult<Vec<Transaction>> {
    let query = FilterQuery::select(filter, range);
    tracing::debug!(?query, "querying transactions");

    let transactions = match query {
        FilterQuery::All => storage.transactions.get_all()?,
        FilterQuery::ByAccounts => storage.transactions.get_by_accounts(&filter.accounts)?,
        FilterQuery::ByDateRange(range) => {
            storage.transactions.get_by_date_range(range.start, range.end)?
        }
        FilterQuery::ByAccountsAndDateRange(range) => storage
            .transactions
            .get_by_accounts_and_date_range(&filter.accounts, range.start, range.end)?,
    };

    Ok(transactions
        .into_iter()
        .filter(|t| filter.categories.is_empty() || filter.categories.contains(&t.category_id))
        .filter(|t| {
            filter.transaction_types.is_empty()
                || filter.transaction_types.contains(&t.transaction_type)
        })
        .collect())
}

/// Service producing the transaction list for the current settings
pub struct FilterService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    today: Option<NaiveDate>,
}

impl<'a> FilterService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            today: None,
        }
    }

    /// Resolve date ranges relative to `today` instead of the local date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn dates(&self) -> DateRangeService<'a> {
        match self.today {
            Some(today) => DateRangeService::with_today(self.settings, today),
            None => DateRangeService::new(self.settings),
        }
    }

    pub fn is_filter_enabled(&self) -> bool {
        self.settings.filter.is_filter_enabled()
    }

    pub fn current_query(&self) -> FilterQuery {
        FilterQuery::select(&self.settings.filter, self.dates().current_range())
    }

    /// Transactions matching the saved filter, newest first
    pub fn get_filtered_transactions(&self) -> ExpenseResult<Vec<Transaction>> {
        query_transactions(
            self.storage,
            &self.settings.filter,
            self.dates().current_range(),
        )
    }

    /// Label of the active date range
    pub fn range_label(&self) -> String {
        self.dates().current_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{
        AccountId, CategoryId, DateRangeType, Money, TransactionType,
    };
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        cash: AccountId,
        bank: AccountId,
        food: CategoryId,
        salary: CategoryId,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let (cash, bank) = (AccountId::new(), AccountId::new());
        let (food, salary) = (CategoryId::new(), CategoryId::new());

        let rows = [
            (cash, food, TransactionType::Expense, date(1)),
            (cash, salary, TransactionType::Income, date(5)),
            (bank, food, TransactionType::Expense, date(10)),
            (bank, salary, TransactionType::Income, date(17)),
        ];
        for (account, category, kind, day) in rows {
            storage
                .transactions
                .upsert(Transaction::new(account, category, kind, Money::from_cents(100), day))
                .unwrap();
        }
        // Outside October
        storage
            .transactions
            .upsert(Transaction::new(
                cash,
                food,
                TransactionType::Expense,
                Money::from_cents(100),
                NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
            ))
            .unwrap();

        Fixture {
            _temp_dir: temp_dir,
            storage,
            cash,
            bank,
            food,
            salary,
        }
    }

    #[test]
    fn test_query_selection() {
        let range = DateRange::month_of(date(17));
        let mut filter = FilterSettings::default();

        assert_eq!(FilterQuery::select(&filter, None), FilterQuery::All);
        assert_eq!(
            FilterQuery::select(&filter, Some(range)),
            FilterQuery::ByDateRange(range)
        );

        // Category-only filters don't switch to account queries
        filter.categories.push(CategoryId::new());
        assert_eq!(FilterQuery::select(&filter, None), FilterQuery::All);

        filter.accounts.push(AccountId::new());
        assert_eq!(FilterQuery::select(&filter, None), FilterQuery::ByAccounts);
        assert_eq!(
            FilterQuery::select(&filter, Some(range)),
            FilterQuery::ByAccountsAndDateRange(range)
        );
    }

    #[test]
    fn test_default_filter_is_this_month() {
        let f = fixture();
        let settings = Settings::default();
        let service = FilterService::new(&f.storage, &settings).with_today(date(17));

        let transactions = service.get_filtered_transactions().unwrap();
        assert_eq!(transactions.len(), 4);
        assert_eq!(transactions[0].date, date(17));
        assert_eq!(service.range_label(), "October 2026");
    }

    #[test]
    fn test_all_dates_with_accounts() {
        let f = fixture();
        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::All;
        settings.filter.accounts = vec![f.cash];

        let service = FilterService::new(&f.storage, &settings).with_today(date(17));
        assert_eq!(service.current_query(), FilterQuery::ByAccounts);
        assert_eq!(service.get_filtered_transactions().unwrap().len(), 3);
    }

    #[test]
    fn test_category_and_type_narrowing() {
        let f = fixture();
        let mut settings = Settings::default();
        settings.filter.accounts = vec![f.bank];
        settings.filter.categories = vec![f.food, f.salary];
        settings.filter.transaction_types = vec![TransactionType::Income];

        let service = FilterService::new(&f.storage, &settings).with_today(date(17));
        let transactions = service.get_filtered_transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, date(17));

        settings.filter.transaction_types.clear();
        settings.filter.categories = vec![f.food];
        let service = FilterService::new(&f.storage, &settings).with_today(date(17));
        let transactions = service.get_filtered_transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, date(10));
    }

    #[test]
    fn test_today_range() {
        let f = fixture();
        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::Today;

        let service = FilterService::new(&f.storage, &settings).with_today(date(5));
        let transactions = service.get_filtered_transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category_id, f.salary);
    }
}
