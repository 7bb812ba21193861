//! Accounts screen
//!
//! Balances, credit and each account's share of the money held.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::AccountId;
use crate::reports::{ascii_bar, AccountOverview};
use crate::services::AccountService;
use crate::storage::Storage;
use crate::tui::layout::ScreenLayout;
use crate::tui::viewmodel::EventQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountListEvent {
    Deleted { id: AccountId, name: String, transactions_removed: usize },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: AccountId,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub negative: bool,
    pub available: String,
    pub share: f64,
    pub share_label: String,
}

#[derive(Debug, Default)]
pub struct AccountListViewModel {
    pub rows: Vec<AccountRow>,
    pub selected: usize,
    pub total_balance: String,
    pub available_credit: String,
    pub events: EventQueue<AccountListEvent>,
}

impl AccountListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
        let overview = AccountOverview::generate(storage)?;
        let currency = &settings.currency;

        self.rows = overview
            .accounts
            .iter()
            .map(|a| AccountRow {
                id: a.account_id,
                name: a.name.clone(),
                account_type: a.account_type.to_string(),
                balance: a.balance.format_with(currency),
                negative: a.balance.is_negative(),
                available: a
                    .available_credit
                    .map(|m| m.format_with(currency))
                    .unwrap_or_default(),
                share: a.share,
                share_label: a.share_label(),
            })
            .collect();
        self.total_balance = overview.total_balance.format_with(currency);
        self.available_credit = overview.available_credit.format_with(currency);
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    pub fn selected_row(&self) -> Option<&AccountRow> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Delete an account along with its transactions
    pub fn delete(&mut self, storage: &Storage, id: AccountId) {
        match AccountService::new(storage).delete(id) {
            Ok(deleted) => {
                self.rows.retain(|r| r.id != id);
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
                self.events.emit(AccountListEvent::Deleted {
                    id,
                    name: deleted.account.name,
                    transactions_removed: deleted.transactions_removed,
                });
            }
            Err(e) => self.events.emit(AccountListEvent::Failed(e.user_message())),
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, vm: &AccountListViewModel) {
    let layout = ScreenLayout::new(area, 3);

    let header = Paragraph::new(format!(
        "Total {}   Credit available {}   d:Delete",
        vm.total_balance, vm.available_credit
    ))
    .block(
        Block::default()
            .title(" Accounts ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, layout.header);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if vm.rows.is_empty() {
        let text = Paragraph::new("No accounts. Create one with `expense account create`.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, layout.content);
        return;
    }

    let widths = [
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(20),
    ];
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header_row = Row::new(vec![
        Cell::from("Name").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Balance").style(bold),
        Cell::from("Available").style(bold),
        Cell::from("Share").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|row| {
            let balance_style = if row.negative {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.account_type.clone()),
                Cell::from(row.balance.clone()).style(balance_style),
                Cell::from(row.available.clone()),
                Cell::from(format!("{} {}", ascii_bar(row.share, 10), row.share_label)),
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
    use crate::models::{AccountType, Money};
    use crate::services::NewAccount;
    use tempfile::TempDir;

    #[test]
    fn test_refresh_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let settings = Settings::default();
        let service = AccountService::new(&storage);
        let mut input = NewAccount::new("Wallet", AccountType::Cash);
        input.opening_balance = Money::from_cents(4000);
        let wallet = service.create(input).unwrap();
        service.create(NewAccount::new("Bank", AccountType::Bank)).unwrap();

        let mut vm = AccountListViewModel::new();
        vm.refresh(&storage, &settings).unwrap();
        assert_eq!(vm.rows.len(), 2);
        assert_eq!(vm.total_balance, "$40.00");

        vm.delete(&storage, wallet.id);
        assert_eq!(
            vm.events.take(),
            Some(AccountListEvent::Deleted {
                id: wallet.id,
                name: "Wallet".into(),
                transactions_removed: 0,
            })
        );
        assert_eq!(vm.events.take(), None);
        assert_eq!(vm.rows.len(), 1);
    }
}
