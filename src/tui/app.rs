//! Application state for the TUI
//!
//! The App owns the screen view-models and the open dialog. View-models
//! borrow storage and settings only for the duration of a call, so the App
//! can hand out `&mut Settings` to the filter dialog between refreshes.

use chrono::Local;

use crate::config::Settings;
use crate::error::ExpenseError;
use crate::models::{AccountId, CategoryId, DateRangeType, TransactionId};
use crate::services::{ReminderService, SettingsService};
use crate::storage::Storage;

use super::dialogs::FilterDialogState;
use super::screens::{
    AccountListEvent, AccountListViewModel, AnalysisViewModel, CategoryListEvent,
    CategoryListViewModel, TransactionListEvent, TransactionListViewModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Transactions,
    Accounts,
    Categories,
    Analysis,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Self::Transactions,
        Self::Accounts,
        Self::Categories,
        Self::Analysis,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Accounts => "Accounts",
            Self::Categories => "Categories",
            Self::Analysis => "Analysis",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Something waiting for delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Transaction(TransactionId),
    Account { id: AccountId, name: String },
    Category { id: CategoryId, name: String },
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        match self {
            Self::Transaction(_) => "Delete this transaction?".into(),
            Self::Account { name, .. } => {
                format!("Delete account '{}' and all of its transactions?", name)
            }
            Self::Category { name, .. } => {
                format!("Delete category '{}' and all of its transactions?", name)
            }
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(DeleteTarget),
    Filter,
}

pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a mut Settings,
    pub should_quit: bool,
    pub screen: Screen,
    pub dialog: ActiveDialog,
    pub status_message: Option<String>,

    pub transactions: TransactionListViewModel,
    pub accounts: AccountListViewModel,
    pub categories: CategoryListViewModel,
    pub analysis: AnalysisViewModel,
    pub filter_dialog: FilterDialogState,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a mut Settings) -> Self {
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            screen: Screen::default(),
            dialog: ActiveDialog::None,
            status_message: None,
            transactions: TransactionListViewModel::new(),
            accounts: AccountListViewModel::new(),
            categories: CategoryListViewModel::new(),
            analysis: AnalysisViewModel::new(),
            filter_dialog: FilterDialogState::default(),
        };
        app.refresh_all();
        app.check_reminder();
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.clear_status();
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog != ActiveDialog::None
    }

    pub fn close_dialog(&mut self) {
        self.dialog = ActiveDialog::None;
    }

    /// Reload every screen from storage
    pub fn refresh_all(&mut self) {
        let storage = self.storage;
        let settings = &*self.settings;
        let result = self
            .transactions
            .refresh(storage, settings)
            .and_then(|_| self.accounts.refresh(storage, settings))
            .and_then(|_| self.categories.refresh(storage))
            .and_then(|_| self.analysis.refresh(storage, settings));

        if let Err(e) = result {
            self.report_error(&e);
        }
    }

    fn report_error(&mut self, error: &ExpenseError) {
        tracing::warn!(error = %error, "tui operation failed");
        self.set_status(error.user_message());
    }

    /// Show `done`, plus the follow-up error when cleanup failed
    fn report_partial(&mut self, done: String, cleanup: Result<(), ExpenseError>) {
        match cleanup {
            Ok(()) => self.set_status(done),
            Err(e) => {
                tracing::warn!(error = %e, "settings cleanup failed");
                self.set_status(format!("{}; {}", done, e.user_message()));
            }
        }
    }

    fn check_reminder(&mut self) {
        let due = ReminderService::new(self.storage, self.settings)
            .should_notify(Local::now().naive_local());
        match due {
            Ok(true) => self.set_status("Reminder: nothing recorded today"),
            Ok(false) => {}
            Err(e) => self.report_error(&e),
        }
    }

    pub fn move_down(&mut self) {
        match self.screen {
            Screen::Transactions => self.transactions.select_next(),
            Screen::Accounts => self.accounts.select_next(),
            Screen::Categories => self.categories.select_next(),
            Screen::Analysis => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.screen {
            Screen::Transactions => self.transactions.select_previous(),
            Screen::Accounts => self.accounts.select_previous(),
            Screen::Categories => self.categories.select_previous(),
            Screen::Analysis => {}
        }
    }

    /// Ask to delete the selected item on the current screen
    pub fn request_delete(&mut self) {
        let target = match self.screen {
            Screen::Transactions => self.transactions.selected_id().map(DeleteTarget::Transaction),
            Screen::Accounts => self.accounts.selected_row().map(|r| DeleteTarget::Account {
                id: r.id,
                name: r.name.clone(),
            }),
            Screen::Categories => self.categories.selected_row().map(|r| DeleteTarget::Category {
                id: r.id,
                name: r.name.clone(),
            }),
            Screen::Analysis => None,
        };

        match target {
            Some(target) => self.dialog = ActiveDialog::Confirm(target),
            None => self.set_status("Nothing selected"),
        }
    }

    pub fn confirm_delete(&mut self) {
        let ActiveDialog::Confirm(target) = std::mem::take(&mut self.dialog) else {
            return;
        };

        match target {
            DeleteTarget::Transaction(id) => self.transactions.delete(self.storage, id),
            DeleteTarget::Account { id, .. } => self.accounts.delete(self.storage, id),
            DeleteTarget::Category { id, .. } => self.categories.delete(self.storage, id),
        }
        self.process_events();
    }

    /// Drain view-model events into status messages and settings cleanup
    pub fn process_events(&mut self) {
        let mut changed = false;

        for event in self.transactions.events.drain() {
            match event {
                TransactionListEvent::Deleted(_) => {
                    self.set_status("Transaction deleted");
                    changed = true;
                }
                TransactionListEvent::Failed(message) => self.set_status(message),
            }
        }

        for event in self.accounts.events.drain() {
            match event {
                AccountListEvent::Deleted { id, name, transactions_removed } => {
                    let deleted = format!(
                        "Deleted account '{}' ({} transaction(s) removed)",
                        name, transactions_removed
                    );
                    let forgotten = SettingsService::new(self.storage, self.settings).forget_account(id);
                    self.report_partial(deleted, forgotten);
                    changed = true;
                }
                AccountListEvent::Failed(message) => self.set_status(message),
            }
        }

        for event in self.categories.events.drain() {
            match event {
                CategoryListEvent::Deleted { id, name, transactions_removed } => {
                    let deleted = format!(
                        "Deleted category '{}' ({} transaction(s) removed)",
                        name, transactions_removed
                    );
                    let forgotten = SettingsService::new(self.storage, self.settings).forget_category(id);
                    self.report_partial(deleted, forgotten);
                    changed = true;
                }
                CategoryListEvent::Failed(message) => self.set_status(message),
            }
        }

        if changed {
            self.refresh_all();
        }
    }

    pub fn open_filter(&mut self) {
        match FilterDialogState::load(self.storage, self.settings) {
            Ok(state) => {
                self.filter_dialog = state;
                self.dialog = ActiveDialog::Filter;
            }
            Err(e) => self.report_error(&e),
        }
    }

    pub fn apply_filter(&mut self) {
        self.close_dialog();
        match self.filter_dialog.apply(self.storage, self.settings) {
            Ok(()) => {
                self.refresh_all();
                self.set_status("Filter saved");
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Step to the next date range and save it
    pub fn cycle_range(&mut self) {
        let current = self.settings.filter.date_range_type;
        let i = DateRangeType::ALL.iter().position(|r| *r == current).unwrap_or(0);
        let next = DateRangeType::ALL[(i + 1) % DateRangeType::ALL.len()];

        let saved = SettingsService::new(self.storage, self.settings).set_date_range_type(next);
        match saved {
            Ok(()) => {
                self.refresh_all();
                self.set_status(format!("Range: {}", next));
            }
            Err(e) => self.report_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{AccountType, CategoryType, Money};
    use crate::services::{AccountService, CategoryService, NewAccount, NewTransaction, TransactionService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_account_delete_forgets_filter_and_refreshes() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::All;

        let wallet = AccountService::new(&storage)
            .create(NewAccount::new("Wallet", AccountType::Cash))
            .unwrap();
        let food = CategoryService::new(&storage)
            .create("Food", CategoryType::Expense, None, None)
            .unwrap();
        TransactionService::new(&storage)
            .create(NewTransaction {
                account_id: wallet.id,
                category_id: food.id,
                amount: Money::from_cents(1200),
                date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
                notes: String::new(),
                image_path: None,
            })
            .unwrap();
        settings.filter.accounts = vec![wallet.id];
        settings.default_account = Some(wallet.id);

        let mut app = App::new(&storage, &mut settings);
        assert_eq!(app.transactions.rows.len(), 1);

        app.switch_screen(Screen::Accounts);
        app.request_delete();
        assert!(matches!(app.dialog, ActiveDialog::Confirm(DeleteTarget::Account { .. })));
        app.confirm_delete();

        assert!(!app.has_dialog());
        assert!(app.accounts.rows.is_empty());
        assert!(app.transactions.rows.is_empty());
        assert!(app.settings.filter.accounts.is_empty());
        assert_eq!(app.settings.default_account, None);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Deleted account 'Wallet' (1 transaction(s) removed)")
        );
    }

    #[test]
    fn test_delete_keeps_settings_error_visible() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();

        let food = CategoryService::new(&storage)
            .create("Food", CategoryType::Expense, None, None)
            .unwrap();
        settings.filter.categories = vec![food.id];

        // A directory where the settings file belongs makes the save fail
        let settings_file = storage.paths().settings_file();
        let _ = std::fs::remove_file(&settings_file);
        std::fs::create_dir_all(&settings_file).unwrap();

        let mut app = App::new(&storage, &mut settings);
        app.switch_screen(Screen::Categories);
        app.request_delete();
        app.confirm_delete();

        let status = app.status_message.clone().unwrap();
        assert!(status.starts_with("Deleted category 'Food' (0 transaction(s) removed)"));
        assert!(status.ends_with("Unable to save changes. Please try again."));
    }

    #[test]
    fn test_cycle_range_saves_setting() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();

        let mut app = App::new(&storage, &mut settings);
        app.cycle_range();
        assert_eq!(app.settings.filter.date_range_type, DateRangeType::ThisYear);
        assert_eq!(app.status_message.as_deref(), Some("Range: This Year"));
    }

    #[test]
    fn test_delete_with_nothing_selected() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();

        let mut app = App::new(&storage, &mut settings);
        app.request_delete();
        assert!(!app.has_dialog());
        assert_eq!(app.status_message.as_deref(), Some("Nothing selected"));
    }
}
