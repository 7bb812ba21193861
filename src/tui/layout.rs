//! Layout definitions for the TUI
//!
//! Tab bar on top, screen content in the middle, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Screen tabs and the active date range
    pub tabs: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: chunks[0],
            main: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Summary header above a list
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, header_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(header_height), Constraint::Min(3)])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_regions() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.main.height, 20);
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 6, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.y, 2);
    }
}
