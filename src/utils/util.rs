//! # Utility Module
//!
//! Small string helpers used while reading and writing entity key/value pairs.

/// Parses the leading integer of a string the way C `atoi` does: optional
/// leading whitespace and sign, then digits; anything else stops the scan.
///
/// # Examples
///
/// ```
/// use bsp_emit::utils::util::atoi;
///
/// assert_eq!(atoi("42"), 42);
/// assert_eq!(atoi("  -7xyz"), -7);
/// assert_eq!(atoi("light"), 0);
/// ```
pub fn atoi(value: &str) -> i32 {
    let trimmed = value.trim_start();
    let mut chars = trimmed.chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut result: i64 = 0;
    for c in chars {
        match c.to_digit(10) {
            Some(d) => {
                result = result * 10 + d as i64;
                if result > i32::MAX as i64 + 1 {
                    break;
                }
            }
            None => break,
        }
    }
    if negative {
        result = -result;
    }
    result.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Strips trailing whitespace (and control bytes) from a key or value.
pub fn strip_trailing(value: &str) -> &str {
    value.trim_end_matches(|c: char| c.is_whitespace() || c.is_control())
}

/// Case-insensitive ASCII prefix test.
pub fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
