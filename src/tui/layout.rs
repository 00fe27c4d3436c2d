/// Responsive breakpoints for the dashboard layout.
///
/// Single source of truth for width thresholds, so render code never compares
/// against raw column counts.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 80 cols: stage cards show counts only, table drops the concept column
    Compact,
    /// 80-119 cols: full cards, concept column
    Normal,
    /// 120+ cols: table also shows the quote URL column
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=79 => Breakpoint::Compact,
            80..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    pub fn shows_concepts_column(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }

    pub fn shows_url_column(&self) -> bool {
        self.at_least(Breakpoint::Wide)
    }

    pub fn shows_stage_descriptions(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(79), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
    }

    #[test]
    fn columns_by_breakpoint() {
        let compact = Breakpoint::Compact;
        assert!(!compact.shows_concepts_column());
        assert!(!compact.shows_url_column());

        let normal = Breakpoint::Normal;
        assert!(normal.shows_concepts_column());
        assert!(!normal.shows_url_column());

        assert!(Breakpoint::Wide.shows_url_column());
        assert!(Breakpoint::Wide.at_least(Breakpoint::Compact));
    }
}
