// Toolbar component
//
// Current filter description and count on the left, action keys on the right.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: &[(&str, &str)] = &[
    ("r", "重置筛选"),
    ("s", "保存快照"),
    ("c", "复制全部代码"),
    ("q", "退出"),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let [left, right] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(44)]).areas(area);

    let strong = Style::default()
        .fg(theme.foreground)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(theme.muted);

    let status = Line::from(vec![
        Span::styled(" 当前显示: ", muted),
        Span::styled(app.shell.filter_label(), strong),
        Span::styled(" | 共 ", muted),
        Span::styled(app.shell.filtered_count().to_string(), strong),
        Span::styled(" 条", muted),
    ]);
    f.render_widget(Paragraph::new(status), left);

    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (key, action) in KEY_HINTS {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(theme.highlight),
        ));
        spans.push(Span::styled(format!("{} ", action), muted));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        right,
    );
}
