// Concept cloud component
//
// Every concept in the payload as a wrapped row of chips. The active concept
// is filled; the cursor is reversed while the cloud has focus.

use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Gap between chips
const CHIP_GAP: usize = 1;

/// Rendered width of a chip: ` name `
fn chip_width(concept: &str) -> usize {
    concept.width() + 2
}

/// Greedily pack chip indices into lines no wider than `width`.
/// A chip wider than the line gets a line of its own.
pub fn pack_chips(concepts: &[String], width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0;

    for (i, concept) in concepts.iter().enumerate() {
        let w = chip_width(concept);
        let needed = if current.is_empty() { w } else { used + CHIP_GAP + w };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        used = if current.is_empty() { w } else { used + CHIP_GAP + w };
        current.push(i);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let concepts = app.shell.concepts();
    let focused = app.focus == Focus::Concepts;
    let active = app.shell.selection().concept.as_deref();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(if focused { theme.focus } else { theme.border }))
        .title(" 🏷️ 概念板块 ");
    let inner = block.inner(area);

    let packed = pack_chips(concepts, inner.width as usize);

    // Keep the cursor's line in view
    let cursor_line = packed
        .iter()
        .position(|line| line.contains(&app.concept_cursor))
        .unwrap_or(0);
    let visible = inner.height.max(1) as usize;
    let skip = cursor_line.saturating_sub(visible - 1);

    let lines: Vec<Line> = packed
        .iter()
        .skip(skip)
        .take(visible)
        .map(|indices| {
            let mut spans = Vec::with_capacity(indices.len() * 2);
            for (n, &i) in indices.iter().enumerate() {
                if n > 0 {
                    spans.push(Span::raw(" ".repeat(CHIP_GAP)));
                }
                let concept = &concepts[i];
                let mut style = if active == Some(concept.as_str()) {
                    Style::default()
                        .fg(Color::White)
                        .bg(theme.chip_active)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.chip)
                };
                if focused && i == app.concept_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" {} ", concept), style));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
