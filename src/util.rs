//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_width` terminal columns.
///
/// CJK characters and most emoji take two columns, so byte or char counts
/// are not enough. When truncation happens the last column is spent on `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
