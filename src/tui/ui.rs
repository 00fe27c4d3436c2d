// Frame layout
//
// Stacks the dashboard components vertically. Sections that have nothing to
// show (no stage cards, no concepts) collapse to zero height.

use super::app::App;
use super::components::{
    code_strip, concept_cloud, header, log_strip, stage_cards, stock_table, toast, toolbar,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

const HEADER_HEIGHT: u16 = 4;
const STAGE_CARD_HEIGHT: u16 = 4;
const CONCEPT_CLOUD_HEIGHT: u16 = 5;
const TOOLBAR_HEIGHT: u16 = 1;
const CODE_STRIP_HEIGHT: u16 = 3;
const LOG_STRIP_HEIGHT: u16 = 4;

/// Heights for each section, top to bottom
pub fn section_constraints(app: &App, area: Rect) -> [Constraint; 7] {
    let stage_height = if app.visible_stages().is_empty() {
        0
    } else {
        STAGE_CARD_HEIGHT
    };
    let cloud_height = if app.shell.concepts().is_empty() {
        0
    } else {
        CONCEPT_CLOUD_HEIGHT
    };
    // The log strip goes first when space runs out
    let log_height = if area.height >= 36 { LOG_STRIP_HEIGHT } else { 0 };

    [
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(stage_height),
        Constraint::Length(cloud_height),
        Constraint::Length(TOOLBAR_HEIGHT),
        Constraint::Length(CODE_STRIP_HEIGHT),
        Constraint::Min(5),
        Constraint::Length(log_height),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let [header_area, stages_area, cloud_area, toolbar_area, strip_area, table_area, log_area] =
        Layout::vertical(section_constraints(app, area)).areas(area);

    header::render(f, header_area, app);
    if stages_area.height > 0 {
        stage_cards::render(f, stages_area, app);
    }
    if cloud_area.height > 0 {
        concept_cloud::render(f, cloud_area, app);
    }
    toolbar::render(f, toolbar_area, app);
    code_strip::render(f, strip_area, app);
    stock_table::render(f, table_area, app);
    if log_area.height > 0 {
        log_strip::render(f, log_area, app);
    }

    if let Some(message) = app.shell.notification() {
        toast::render(f, area, message, &app.theme);
    }
}
