// Number formatters
//
// Shared formatting for the header and the headless list output.

/// Format a large number with commas for readability
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

/// Hit rate as a percentage with two decimals
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(5120), "5,120");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0 / 3.0), "33.33%");
    }
}
