// Stage cards component
//
// One card per stage in display order, zero-count stages hidden. The number
// key shown on each card selects that stage.

use crate::dashboard::stage::stage_config;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stages = app.visible_stages();
    if stages.is_empty() {
        return;
    }

    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);
    let active = app.shell.selection().stage.as_deref();

    let constraints = vec![Constraint::Ratio(1, stages.len() as u32); stages.len()];
    let cells = Layout::horizontal(constraints).split(area);

    for (i, (stage, cell)) in stages.iter().zip(cells.iter()).enumerate() {
        let is_active = active == Some(*stage);
        let badge = theme.stage_badge(stage);

        let mut border = Style::default().fg(theme.stage_border(stage));
        if is_active {
            border = border.add_modifier(Modifier::BOLD);
        }

        let mut lines = vec![Line::from(vec![
            Span::styled(
                app.shell.stage_count(stage).to_string(),
                Style::default()
                    .fg(theme.stage_border(stage))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" 只", Style::default().fg(theme.muted)),
        ])];
        if bp.shows_stage_descriptions() {
            if let Some(config) = stage_config(stage) {
                lines.push(Line::from(Span::styled(
                    config.description,
                    Style::default().fg(theme.muted),
                )));
            }
        }

        let marker = if is_active { "▶ " } else { "" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_active {
                ratatui::widgets::BorderType::Double
            } else {
                theme.border_type
            })
            .border_style(border)
            .title(Line::from(vec![
                Span::styled(format!(" {}{} ", marker, i + 1), Style::default().fg(theme.muted)),
                Span::styled(format!(" {} ", stage), badge),
            ]));

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(card, *cell);
    }
}
