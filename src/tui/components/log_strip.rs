// Log strip component
//
// The most recent log lines captured by the TUI log layer.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(theme.log_error),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        _ => Style::default().fg(theme.muted),
    }
}

fn entry_line<'a>(entry: &'a LogEntry, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{:<5} ", entry.level.as_str()), level_style(entry.level, theme)),
        Span::styled(entry.message.as_str(), Style::default().fg(theme.foreground)),
    ])
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" 日志 ", Style::default().fg(theme.muted)));
    let rows = block.inner(area).height as usize;

    let entries = app.log_buffer.latest(rows);
    let lines: Vec<Line> = entries.iter().map(|entry| entry_line(entry, theme)).collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
