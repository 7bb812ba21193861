//! Confirmation dialog
//!
//! Yes/no prompt shown before anything is deleted

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green)),
            Span::raw(" Delete  "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
