//! Analysis screen
//!
//! Category breakdown of the filtered transactions. Each category gets a
//! percentage bar; `t` switches between expenses and income.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::models::{Currency, TransactionType};
use crate::reports::{ascii_bar, AnalysisReport};
use crate::services::FilterService;
use crate::storage::Storage;
use crate::tui::layout::ScreenLayout;

const BAR_WIDTH: usize = 24;

#[derive(Debug)]
pub struct AnalysisViewModel {
    pub report: Option<AnalysisReport>,
    pub kind: TransactionType,
    currency: Currency,
}

impl Default for AnalysisViewModel {
    fn default() -> Self {
        Self {
            report: None,
            kind: TransactionType::Expense,
            currency: Currency::default(),
        }
    }
}

impl AnalysisViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, storage: &Storage, settings: &Settings) -> ExpenseResult<()> {
        let filter = FilterService::new(storage, settings);
        let transactions = filter.get_filtered_transactions()?;
        self.report = Some(AnalysisReport::generate(storage, &transactions, filter.range_label())?);
        self.currency = settings.currency.clone();
        Ok(())
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            TransactionType::Expense => TransactionType::Income,
            TransactionType::Income => TransactionType::Expense,
        };
    }

    /// One line per category: name, amount, bar, percentage
    pub fn lines(&self) -> Vec<String> {
        let Some(report) = &self.report else {
            return Vec::new();
        };
        report
            .slices(self.kind)
            .iter()
            .map(|slice| {
                format!(
                    "{:<18} {:>12}  {} {:>8}",
                    slice.category_name.chars().take(18).collect::<String>(),
                    slice.amount.format_with(&self.currency),
                    ascii_bar(slice.percentage, BAR_WIDTH),
                    slice.percentage_label()
                )
            })
            .collect()
    }
}

pub fn render(frame: &mut Frame, area: Rect, vm: &AnalysisViewModel) {
    let layout = ScreenLayout::new(area, 5);

    let (period, summary) = match &vm.report {
        Some(report) => (
            report.period.clone(),
            vec![
                Line::from(vec![
                    Span::raw("Income  "),
                    Span::styled(
                        report.income_total.format_with(&vm.currency),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("   Expense  "),
                    Span::styled(
                        report.expense_total.format_with(&vm.currency),
                        Style::default().fg(Color::Red),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("Net     "),
                    Span::styled(
                        report.net().format_with(&vm.currency),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("   {} transaction(s)", report.transaction_count)),
                ]),
                Line::from(Span::styled(
                    format!("Showing {}  (t to switch)", vm.kind.to_string().to_lowercase()),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        None => (String::new(), vec![Line::from("Loading...")]),
    };

    let header = Paragraph::new(summary).block(
        Block::default()
            .title(format!(" Analysis: {} ", period))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, layout.header);

    let lines = vm.lines();
    let body: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "Nothing to analyse for this filter.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines.into_iter().map(Line::from).collect()
    };

    let content = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(content, layout.content);
}
