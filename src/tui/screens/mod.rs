//! TUI screens
//!
//! Each screen pairs a view-model (state plus commands) with a render
//! function. `render` draws the tab bar, the active screen, the status bar
//! and any open dialog.

pub mod accounts;
pub mod analysis;
pub mod categories;
pub mod transactions;

pub use accounts::{AccountListEvent, AccountListViewModel};
pub use analysis::AnalysisViewModel;
pub use categories::{CategoryListEvent, CategoryListViewModel};
pub use transactions::{TransactionListEvent, TransactionListViewModel};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::app::{ActiveDialog, App, Screen};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.screen {
        Screen::Transactions => transactions::render(frame, layout.main, &app.transactions),
        Screen::Accounts => accounts::render(frame, layout.main, &app.accounts),
        Screen::Categories => categories::render(frame, layout.main, &app.categories),
        Screen::Analysis => analysis::render(frame, layout.main, &app.analysis),
    }

    render_status_bar(frame, app, layout.status_bar);

    match &app.dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::Confirm(target) => dialogs::confirm::render(frame, &target.prompt()),
        ActiveDialog::Filter => dialogs::filter::render(frame, &app.filter_dialog),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();

    let selected = Screen::ALL.iter().position(|s| *s == app.screen).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title(" Expense Manager ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.transactions.range_label),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = " q:Quit  ?:Help  1-4:Screens ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
