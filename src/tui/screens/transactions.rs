//! Transactions screen
//!
//! The filtered transaction list. The view-model re-queries the filter
//! service on every refresh and reports deletions through its event queue.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::config::Settings;
use crate::display::transaction::{signed_amount, NameLookup};
use crate::error::ExpenseResult;
use crate::models::{Money, TransactionId};
use crate::services::date_range::format_date;
use crate::services::{FilterService, TransactionService};
use crate::storage::Storage;
use crate::tui::layout::ScreenLayout;
use crate::tui::viewmodel::EventQueue;

/// One-shot results of transaction commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionListEvent {
    Deleted(TransactionId),
    Failed(String),
}

/// A transaction prepared for display
#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub date: String,
    pub category: String,
    pub account: String,
    pub amount: String,
    pub is_income: bool,
    pub notes: String,
}

#[derive(Debug, Default)]
pub struct TransactionListViewModel {
    pub rows: Vec<TransactionRow>,
    pub selected: usize,
    pub range_label: String,
    pub filter_enabled: bool,
    pub income: String,
    pub expense: String,
    pub events: EventQueue<TransactionListEvent>,
}

impl TransactionListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the list for the saved filter
    pub fn refresh(&mut self, storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
        let filter = FilterService::new(storage, settings);
        let transactions = filter.get_filtered_transactions()?;
        let names = NameLookup::new(&storage.accounts.get_all()?, &storage.categories.get_all()?);

        let income: Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expense: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

        self.rows = transactions
            .iter()
            .map(|txn| TransactionRow {
                id: txn.id,
                date: format_date(txn.date, &settings.date_format),
                category: names.category(&txn.category_id).to_string(),
                account: names.account(&txn.account_id).to_string(),
                amount: signed_amount(txn, &settings.currency),
                is_income: txn.is_income(),
                notes: txn.notes.clone(),
            })
            .collect();
        self.range_label = filter.range_label();
        self.filter_enabled = filter.is_filter_enabled();
        self.income = income.format_with(&settings.currency);
        self.expense = expense.format_with(&settings.currency);
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    pub fn selected_id(&self) -> Option<TransactionId> {
        self.rows.get(self.selected).map(|r| r.id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Delete a transaction and drop it from the list
    pub fn delete(&mut self, storage: &Storage, id: TransactionId) {
        match TransactionService::new(storage).delete(id) {
            Ok(txn) => {
                self.rows.retain(|r| r.id != id);
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
                self.events.emit(TransactionListEvent::Deleted(txn.id));
            }
            Err(e) => self.events.emit(TransactionListEvent::Failed(e.user_message())),
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, vm: &TransactionListViewModel) {
    let layout = ScreenLayout::new(area, 3);

    let title = if vm.filter_enabled {
        format!(" Transactions: {} (filtered) ", vm.range_label)
    } else {
        format!(" Transactions: {} ", vm.range_label)
    };
    let header = Paragraph::new(format!(
        "Income {}   Expense {}   f:Filter  r:Range  d:Delete",
        vm.income, vm.expense
    ))
    .block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, layout.header);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if vm.rows.is_empty() {
        let text = Paragraph::new("No transactions for this filter.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, layout.content);
        return;
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header_row = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Account").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Notes").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|row| {
            let amount_style = if row.is_income {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(row.category.clone()),
                Cell::from(row.account.clone()),
                Cell::from(row.amount.clone()).style(amount_style),
                Cell::from(row.notes.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(vm.selected));
    frame.render_stateful_widget(table, layout.content, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use crate::models::{Account, AccountType, Category, CategoryType, DateRangeType, Transaction};
    use crate::services::{AccountService, NewAccount, NewTransaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::All;
        (temp_dir, storage, settings)
    }

    fn record(storage: &Storage, account: &Account, category: &Category, cents: i64) -> Transaction {
        TransactionService::new(storage)
            .create(NewTransaction {
                account_id: account.id,
                category_id: category.id,
                amount: Money::from_cents(cents),
                date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
                notes: String::new(),
                image_path: None,
            })
            .unwrap()
    }

    #[test]
    fn test_delete_emits_deleted_once() {
        let (_temp_dir, storage, settings) = setup();
        let account = AccountService::new(&storage)
            .create(NewAccount::new("Wallet", AccountType::Cash))
            .unwrap();
        let food = Category::new("Food", CategoryType::Expense);
        storage.categories.upsert(food.clone()).unwrap();
        let txn = record(&storage, &account, &food, 900);

        let mut vm = TransactionListViewModel::new();
        vm.refresh(&storage, &settings).unwrap();
        assert_eq!(vm.rows.len(), 1);

        vm.delete(&storage, txn.id);

        assert_eq!(vm.events.take(), Some(TransactionListEvent::Deleted(txn.id)));
        assert_eq!(vm.events.take(), None);
        assert!(vm.rows.is_empty());
        assert!(storage.transactions.get(txn.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_reports_failure() {
        let (_temp_dir, storage, _settings) = setup();
        let mut vm = TransactionListViewModel::new();

        vm.delete(&storage, TransactionId::new());

        assert!(matches!(vm.events.take(), Some(TransactionListEvent::Failed(_))));
        assert!(vm.events.is_empty());
    }

    #[test]
    fn test_refresh_applies_filter_and_selection() {
        let (_temp_dir, storage, mut settings) = setup();
        let account = AccountService::new(&storage)
            .create(NewAccount::new("Wallet", AccountType::Cash))
            .unwrap();
        let food = Category::new("Food", CategoryType::Expense);
        let salary = Category::new("Salary", CategoryType::Income);
        storage.categories.upsert(food.clone()).unwrap();
        storage.categories.upsert(salary.clone()).unwrap();
        record(&storage, &account, &food, 500);
        record(&storage, &account, &salary, 10000);

        let mut vm = TransactionListViewModel::new();
        vm.refresh(&storage, &settings).unwrap();
        assert_eq!(vm.rows.len(), 2);
        vm.select_next();
        vm.select_next();
        assert_eq!(vm.selected, 1);

        settings.filter.categories = vec![food.id];
        vm.refresh(&storage, &settings).unwrap();
        assert_eq!(vm.rows.len(), 1);
        assert_eq!(vm.selected, 0);
        assert!(vm.filter_enabled);
        assert_eq!(vm.rows[0].category, "Food");
        assert_eq!(vm.expense, "$5.00");
    }
}
