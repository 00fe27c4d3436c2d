// Code strip component
//
// The filtered codes as one comma-joined line; `y` copies it as shown.

use crate::tui::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HINT: &str = " [y] 复制 ";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title_bottom(Line::from(Span::styled(HINT, Style::default().fg(theme.muted))).right_aligned());
    let inner = block.inner(area);

    let codes = truncate_to_width(&app.shell.code_strip(), inner.width as usize);
    let strip = Paragraph::new(Span::styled(codes, Style::default().fg(theme.code_strip)))
        .block(block);

    f.render_widget(strip, area);
}
