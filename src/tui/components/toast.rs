//! Toast notification overlay
//!
//! Draws the shell's current notification centred at the bottom of the
//! screen, on top of other content. Visibility and auto-clear are owned by
//! the shell's notifier; this is render only.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Toast rectangle for a message inside `area`
pub fn toast_area(message: &str, area: Rect) -> Rect {
    // 2 cells padding each side plus borders
    let width = (message.width() as u16 + 6).min(area.width.saturating_sub(4));
    let height = 3;

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.bottom().saturating_sub(height + 1);

    Rect::new(x, y, width, height)
}

pub fn render(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let rect = toast_area(message, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight));

    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    // Clear first so the toast sits on top
    f.render_widget(Clear, rect);
    f.render_widget(text, rect);
}
