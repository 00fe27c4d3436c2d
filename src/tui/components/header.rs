// Header component
//
// Strategy name plus the scan summary: scanned, hit, hit rate, report time.

use super::formatters::{format_number, format_percent};
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let payload = app.shell.payload();
    let label = Style::default().fg(theme.muted);

    let summary = Line::from(vec![
        Span::styled(" 扫描总数 ", label),
        Span::styled(
            format_number(payload.total_scanned),
            Style::default()
                .fg(theme.scanned)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  符合条件 ", label),
        Span::styled(
            format_number(payload.total_hit),
            Style::default().fg(theme.hit).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  命中率 ", label),
        Span::styled(
            format_percent(payload.hit_rate()),
            Style::default()
                .fg(theme.hit_rate)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  报告时间 ", label),
        Span::styled(
            app.opened_at.format("%Y/%-m/%-d %H:%M:%S").to_string(),
            Style::default().fg(theme.foreground),
        ),
    ]);

    let strategy = Line::from(Span::styled(
        format!(" {}", payload.strategy_display_name),
        Style::default().fg(theme.foreground),
    ));

    let header = Paragraph::new(vec![strategy, summary]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title(Span::styled(
                " 🎯 量化扫描仪表盘 ",
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(header, area);
}
