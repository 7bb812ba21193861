//! Categories screen

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::error::ExpenseResult;
use crate::models::{CategoryId, CategoryType};
use crate::services::CategoryService;
use crate::storage::Storage;
use crate::tui::viewmodel::EventQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryListEvent {
    Deleted { id: CategoryId, name: String, transactions_removed: usize },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
    pub transaction_count: usize,
}

#[derive(Debug, Default)]
pub struct CategoryListViewModel {
    pub rows: Vec<CategoryRow>,
    pub selected: usize,
    pub events: EventQueue<CategoryListEvent>,
}

impl CategoryListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, storage: &Storage) -> ExpenseResult<()> {
        self.rows = CategoryService::new(storage)
            .list()?
            .into_iter()
            .map(|c| {
                Ok(CategoryRow {
                    transaction_count: storage.transactions.count_by_category(c.id)?,
                    id: c.id,
                    name: c.name,
                    category_type: c.category_type,
                    color: c.color,
                })
            })
            .collect::<ExpenseResult<_>>()?;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    pub fn selected_row(&self) -> Option<&CategoryRow> {
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

    pub fn delete(&mut self, storage: &Storage, id: CategoryId) {
        match CategoryService::new(storage).delete(id) {
            Ok(deleted) => {
                self.rows.retain(|r| r.id != id);
                self.selected = self.selected.min(self.rows.len().saturating_sub(1));
                self.events.emit(CategoryListEvent::Deleted {
                    id,
                    name: deleted.category.name,
                    transactions_removed: deleted.transactions_removed,
                });
            }
            Err(e) => self.events.emit(CategoryListEvent::Failed(e.user_message())),
        }
    }
}

/// Parse `#RRGGBB` into a terminal color
fn swatch(color: &str) -> Color {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Gray;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

pub fn render(frame: &mut Frame, area: Rect, vm: &CategoryListViewModel) {
    let block = Block::default()
        .title(" Categories  d:Delete ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if vm.rows.is_empty() {
        let text = Paragraph::new("No categories. Run `expense init` to create the defaults.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(2),
        Constraint::Length(24),
        Constraint::Length(10),
        Constraint::Min(12),
    ];
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header_row = Row::new(vec![
        Cell::from(""),
        Cell::from("Name").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Transactions").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from("●").style(Style::default().fg(swatch(&row.color))),
                Cell::from(row.name.clone()),
                Cell::from(row.category_type.to_string()),
                Cell::from(row.transaction_count.to_string()),
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
    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AppPaths;
    use tempfile::TempDir;

    #[test]
    fn test_refresh_orders_expense_first() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(AppPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = CategoryService::new(&storage);
        service.create("Salary", CategoryType::Income, None, None).unwrap();
        let food = service.create("Food", CategoryType::Expense, None, None).unwrap();

        let mut vm = CategoryListViewModel::new();
        vm.refresh(&storage).unwrap();
        assert_eq!(vm.rows[0].name, "Food");

        vm.delete(&storage, food.id);
        assert!(matches!(vm.events.take(), Some(CategoryListEvent::Deleted { .. })));
        assert!(vm.events.take().is_none());
        assert_eq!(vm.rows.len(), 1);
    }

    #[test]
    fn test_swatch() {
        assert_eq!(swatch("#FF8000"), Color::Rgb(255, 128, 0));
        assert_eq!(swatch("nope"), Color::Gray);
    }
}
