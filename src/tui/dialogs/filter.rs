//! Filter dialog
//!
//! Edits the saved transaction filter: a date range plus optional account,
//! category and type selections. Nothing checked in a section means "all".
//! Changes are only saved on apply.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::{FilterSettings, Settings};
use crate::error::ExpenseResult;
use crate::models::{AccountId, CategoryId, DateRangeType, TransactionType};
use crate::services::SettingsService;
use crate::storage::Storage;
use crate::tui::layout::centered_rect_fixed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSection {
    #[default]
    Range,
    Accounts,
    Categories,
    Types,
}

impl FilterSection {
    const ORDER: [FilterSection; 4] = [Self::Range, Self::Accounts, Self::Categories, Self::Types];

    fn title(&self) -> &'static str {
        match self {
            Self::Range => "Date range",
            Self::Accounts => "Accounts",
            Self::Categories => "Categories",
            Self::Types => "Types",
        }
    }

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct FilterOption<T> {
    pub value: T,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FilterDialogState {
    pub section: FilterSection,
    pub cursor: usize,
    pub range: DateRangeType,
    pub accounts: Vec<FilterOption<AccountId>>,
    pub categories: Vec<FilterOption<CategoryId>>,
    pub types: Vec<FilterOption<TransactionType>>,
    base: FilterSettings,
}

impl FilterDialogState {
    /// Fill the dialog from the saved filter
    pub fn load(storage: &Storage, settings: &Settings) -> ExpenseResult<Self> {
        let filter = &settings.filter;

        let accounts = storage
            .accounts
            .get_all()?
            .into_iter()
            .map(|a| FilterOption {
                checked: filter.accounts.contains(&a.id),
                value: a.id,
                label: a.name,
            })
            .collect();

        let categories = storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| FilterOption {
                checked: filter.categories.contains(&c.id),
                label: format!("{} ({})", c.name, c.category_type),
                value: c.id,
            })
            .collect();

        let types = [TransactionType::Expense, TransactionType::Income]
            .into_iter()
            .map(|t| FilterOption {
                checked: filter.transaction_types.contains(&t),
                label: t.to_string(),
                value: t,
            })
            .collect();

        Ok(Self {
            section: FilterSection::Range,
            cursor: DateRangeType::ALL
                .iter()
                .position(|r| *r == filter.date_range_type)
                .unwrap_or(0),
            range: filter.date_range_type,
            accounts,
            categories,
            types,
            base: filter.clone(),
        })
    }

    fn section_len(&self) -> usize {
        match self.section {
            FilterSection::Range => DateRangeType::ALL.len(),
            FilterSection::Accounts => self.accounts.len(),
            FilterSection::Categories => self.categories.len(),
            FilterSection::Types => self.types.len(),
        }
    }

    pub fn next_section(&mut self) {
        self.section = self.section.next();
        self.cursor = 0;
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.section_len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Select the range under the cursor, or flip a checkbox
    pub fn toggle(&mut self) {
        let cursor = self.cursor;
        match self.section {
            FilterSection::Range => {
                if let Some(range) = DateRangeType::ALL.get(cursor) {
                    self.range = *range;
                }
            }
            FilterSection::Accounts => flip(&mut self.accounts, cursor),
            FilterSection::Categories => flip(&mut self.categories, cursor),
            FilterSection::Types => flip(&mut self.types, cursor),
        }
    }

    /// The filter as currently edited
    pub fn to_filter(&self) -> FilterSettings {
        FilterSettings {
            date_range_type: self.range,
            custom_range: self.base.custom_range,
            accounts: checked(&self.accounts),
            categories: checked(&self.categories),
            transaction_types: checked(&self.types),
        }
    }

    /// Save the edited filter
    pub fn apply(&self, storage: &Storage, settings: &mut Settings) -> ExpenseResult<()> {
        let filter = self.to_filter();
        if filter == settings.filter {
            return Ok(());
        }
        SettingsService::new(storage, settings).set_filter(filter)
    }
}

fn flip<T>(options: &mut [FilterOption<T>], index: usize) {
    if let Some(option) = options.get_mut(index) {
        option.checked = !option.checked;
    }
}

fn checked<T: Copy>(options: &[FilterOption<T>]) -> Vec<T> {
    options.iter().filter(|o| o.checked).map(|o| o.value).collect()
}

pub fn render(frame: &mut Frame, state: &FilterDialogState) {
    let area = centered_rect_fixed(64, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter  Tab:Section  Space:Toggle  Enter:Apply  Esc:Cancel ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(columns[1]);

    let range_items: Vec<(String, bool)> = DateRangeType::ALL
        .iter()
        .map(|r| (r.to_string(), *r == state.range))
        .collect();
    render_section(frame, left[0], state, FilterSection::Range, &range_items, "( )", "(•)");
    render_section(frame, left[1], state, FilterSection::Accounts, &labels(&state.accounts), "[ ]", "[x]");
    render_section(frame, right[0], state, FilterSection::Categories, &labels(&state.categories), "[ ]", "[x]");
    render_section(frame, right[1], state, FilterSection::Types, &labels(&state.types), "[ ]", "[x]");
}

fn labels<T>(options: &[FilterOption<T>]) -> Vec<(String, bool)> {
    options.iter().map(|o| (o.label.clone(), o.checked)).collect()
}

fn render_section(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &FilterDialogState,
    section: FilterSection,
    items: &[(String, bool)],
    off: &str,
    on: &str,
) {
    let active = state.section == section;
    let title_style = if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![Line::from(Span::styled(section.title(), title_style))];
    if items.is_empty() {
        lines.push(Line::from(Span::styled(" none", Style::default().fg(Color::DarkGray))));
    }

    // Keep the cursor visible in short sections
    let visible = area.height.saturating_sub(1) as usize;
    let skip = if active && state.cursor >= visible {
        state.cursor + 1 - visible
    } else {
        0
    };

    for (i, (label, is_on)) in items.iter().enumerate().skip(skip).take(visible) {
        let marker = if *is_on { on } else { off };
        let style = if active && i == state.cursor {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!(" {} {}", marker, label), style)));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
