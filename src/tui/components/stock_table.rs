// Stock table component
//
// One row per filtered result: stage badge, name, code, price, change,
// concept chips and (on wide terminals) the quote page URL.

use crate::dashboard::{ChangeDirection, ScanResult};
use crate::tui::app::{App, Focus};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Names are cut to this many columns
const NAME_WIDTH: usize = 10;

fn change_cell(result: &ScanResult, theme: &Theme) -> Cell<'static> {
    let (icon, color) = match result.change_direction() {
        ChangeDirection::Up => ("📈", theme.up),
        ChangeDirection::Down => ("📉", theme.down),
        ChangeDirection::Unknown => ("  ", theme.muted),
    };
    Cell::from(format!("{} {}", icon, result.change))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Concept chips; `highlight` marks the chip under the table cursor
fn concept_cell(result: &ScanResult, highlight: Option<usize>, theme: &Theme) -> Cell<'static> {
    let mut spans = Vec::new();
    for (i, tag) in result.concept_tags().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let mut style = Style::default().fg(theme.chip);
        if highlight == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[{}]", tag), style));
    }
    Cell::from(Line::from(spans))
}

fn render_empty(f: &mut Frame, area: Rect, block: Block, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from("📭"),
        Line::from(Span::styled(
            "暂无符合条件的标的",
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            "请尝试调整筛选条件",
            Style::default().fg(theme.muted),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Table;
    let bp = Breakpoint::from_width(area.width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(if focused { theme.focus } else { theme.border }))
        .title(" 📋 标的列表 ")
        .title_bottom(
            Line::from(Span::styled(
                " ↑↓ 选择  ←→ 概念  Enter 筛选  u 复制链接 ",
                Style::default().fg(theme.muted),
            ))
            .right_aligned(),
        );

    let results = app.shell.filtered();
    if results.is_empty() {
        render_empty(f, area, block, theme);
        return;
    }

    let mut header = vec!["状态", "名称", "代码", "现价", "涨跌幅"];
    let mut widths = vec![
        Constraint::Length(22),
        Constraint::Length(NAME_WIDTH as u16),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    if bp.shows_concepts_column() {
        header.push("概念板块");
        widths.push(Constraint::Min(20));
    }
    if bp.shows_url_column() {
        header.push("详情");
        widths.push(Constraint::Length(50));
    }

    let rows: Vec<Row> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let mut cells = vec![
                Cell::from(Span::styled(
                    format!(" {} ", result.stage),
                    theme.stage_badge(&result.stage),
                )),
                Cell::from(truncate_to_width(&result.name, NAME_WIDTH))
                    .style(Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD)),
                Cell::from(result.code.clone()).style(Style::default().fg(theme.foreground)),
                Cell::from(format!("¥{}", result.price))
                    .style(Style::default().fg(theme.foreground)),
                change_cell(result, theme),
            ];
            if bp.shows_concepts_column() {
                let highlight = (focused && i == app.row_cursor).then_some(app.chip_cursor);
                cells.push(concept_cell(result, highlight, theme));
            }
            if bp.shows_url_column() {
                cells.push(Cell::from(result.quote_url()).style(Style::default().fg(theme.muted)));
            }
            Row::new(cells)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(ratatui::style::Color::Rgb(31, 41, 55)))
        .highlight_symbol("▶ ")
        .block(block);

    let mut state = TableState::default().with_selected(Some(app.row_cursor));
    f.render_stateful_widget(table, area, &mut state);
}
