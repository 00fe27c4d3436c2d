// Dashboard colours for the TUI
//
// Stage colours come from the stage table as hex strings; everything else is
// a fixed palette. Chinese market convention: red is up, green is down.

use crate::dashboard::stage::stage_config;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub focus: Color,
    pub border_type: BorderType,

    pub scanned: Color,
    pub hit: Color,
    pub hit_rate: Color,

    pub chip: Color,
    pub chip_active: Color,
    pub code_strip: Color,

    pub up: Color,
    pub down: Color,

    pub log_error: Color,
    pub log_warn: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Rgb(129, 140, 248),
            foreground: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(156, 163, 175),
            border: Color::Rgb(75, 85, 99),
            highlight: Color::Rgb(165, 180, 252),
            focus: Color::Rgb(196, 181, 253),
            border_type: BorderType::Rounded,

            scanned: Color::Rgb(129, 140, 248),
            hit: Color::Rgb(52, 211, 153),
            hit_rate: Color::Rgb(251, 191, 36),

            chip: Color::Rgb(56, 189, 248),
            chip_active: Color::Rgb(14, 165, 233),
            code_strip: Color::Rgb(56, 189, 248),

            up: Color::Rgb(220, 38, 38),
            down: Color::Rgb(5, 150, 105),

            log_error: Color::Rgb(248, 113, 113),
            log_warn: Color::Rgb(251, 191, 36),
        }
    }
}

impl Theme {
    /// Badge style for a stage label; unknown stages get a neutral grey badge
    pub fn stage_badge(&self, stage: &str) -> Style {
        match stage_config(stage) {
            Some(config) => Style::default()
                .fg(hex_to_color(config.text).unwrap_or(self.foreground))
                .bg(hex_to_color(config.background).unwrap_or(Color::Reset))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(self.foreground).bg(Color::Rgb(55, 65, 81)),
        }
    }

    /// Border colour of a stage card
    pub fn stage_border(&self, stage: &str) -> Color {
        stage_config(stage)
            .and_then(|config| hex_to_color(config.border))
            .unwrap_or(self.border)
    }
}

/// Parse `#rrggbb` into a terminal colour
pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::stage::STAGE_ACCUMULATING;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#1e40af"), Some(Color::Rgb(0x1e, 0x40, 0xaf)));
        assert_eq!(hex_to_color("fafafa"), Some(Color::Rgb(0xfa, 0xfa, 0xfa)));
        assert_eq!(hex_to_color("#fff"), None);
        assert_eq!(hex_to_color("#zzzzzz"), None);
        assert_eq!(hex_to_color("#好好"), None);
    }

    #[test]
    fn test_stage_badge_known_and_unknown() {
        let theme = Theme::default();
        let known = theme.stage_badge(STAGE_ACCUMULATING);
        assert_eq!(known.fg, Some(Color::Rgb(0x1e, 0x40, 0xaf)));
        assert_eq!(known.bg, Some(Color::Rgb(0xef, 0xf6, 0xff)));

        let unknown = theme.stage_badge("🌋 未知阶段");
        assert_eq!(unknown.fg, Some(theme.foreground));
        assert_eq!(theme.stage_border("🌋 未知阶段"), theme.border);
    }
}
