//! Help dialog

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

const KEYS: &[(&str, &str)] = &[
    ("1-4 / Tab", "Switch screen"),
    ("j/k, ↓/↑", "Move selection"),
    ("d", "Delete selected item"),
    ("f", "Edit filter"),
    ("r", "Cycle date range"),
    ("t", "Expense/income breakdown (Analysis)"),
    ("?", "Show/hide help"),
    ("Esc", "Close dialog"),
    ("q", "Quit"),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect_fixed(54, KEYS.len() as u16 + 6, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(KEYS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::raw(*action),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Create and edit records with the `expense` command.",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
