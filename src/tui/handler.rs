//! Event handler for the TUI
//!
//! Routes key presses to the open dialog first, then to the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, Screen};
use super::event::Event;

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) | Event::Tick => {}
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.dialog {
        ActiveDialog::None => handle_screen_key(app, key),
        ActiveDialog::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.close_dialog();
            }
        }
        ActiveDialog::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::Filter => handle_filter_key(app, key),
    }
}

fn handle_screen_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.dialog = ActiveDialog::Help,
        KeyCode::Char('1') => app.switch_screen(Screen::Transactions),
        KeyCode::Char('2') => app.switch_screen(Screen::Accounts),
        KeyCode::Char('3') => app.switch_screen(Screen::Categories),
        KeyCode::Char('4') => app.switch_screen(Screen::Analysis),
        KeyCode::Tab => app.switch_screen(app.screen.next()),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('f') => app.open_filter(),
        KeyCode::Char('r') => app.cycle_range(),
        KeyCode::Char('t') if app.screen == Screen::Analysis => app.analysis.toggle_kind(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.apply_filter(),
        KeyCode::Tab => app.filter_dialog.next_section(),
        KeyCode::Char('j') | KeyCode::Down => app.filter_dialog.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.filter_dialog.move_up(),
        KeyCode::Char(' ') => app.filter_dialog.toggle(),
        _ => {}
    }
}
