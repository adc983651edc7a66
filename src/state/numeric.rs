use std::sync::OnceLock;

use regex::Regex;

// Optional minus sign, digits, optional decimal point, at least one digit.
// "12." and "1,2" do not match; ".5" and "-3" do.
fn valid_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d*\.?\d+$").expect("numeric pattern compiles"))
}

/// Returns true when `text` is acceptable numeric input. Empty (or
/// whitespace-only) text is valid and treated as 0 downstream.
pub fn is_valid_number(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || valid_number_pattern().is_match(trimmed)
}

/// Parses the leading numeric prefix of `text`: optional sign, digits with at
/// most one decimal point, and a trailing exponent when complete. Returns
/// `None` when no finite number can be extracted, so `"12abc"` yields 12.0
/// and `"abc"` yields nothing.
pub fn parse_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        pos += 1;
    }

    let mut digits = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
        digits += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Extend over an exponent only when it is complete ("12e" stays 12).
    let mut end = pos;
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'-' | b'+') {
            exp += 1;
        }
        let exp_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_start {
            end = exp;
        }
    }

    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient parse: empty or non-numeric text counts as 0. Never fails.
pub fn parse_number(text: &str) -> f64 {
    parse_prefix(text).unwrap_or(0.0)
}

/// Sum over all values; invalid or empty entries contribute 0.
pub fn safe_sum<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(parse_number).sum()
}

/// Mean over only the entries that parse to a finite number; 0 when none do.
pub fn safe_avg<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let parsed: Vec<f64> = values.into_iter().filter_map(parse_prefix).collect();
    if parsed.is_empty() {
        return 0.0;
    }
    parsed.iter().sum::<f64>() / parsed.len() as f64
}

/// Formats with exactly two decimal digits.
pub fn to_fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Rounds half away from zero.
pub fn to_integer(value: f64) -> i64 {
    value.round() as i64
}
