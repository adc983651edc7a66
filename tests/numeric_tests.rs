use coalsheet::state::numeric::{
    is_valid_number, parse_number, parse_prefix, safe_avg, safe_sum, to_fixed2, to_integer,
};

#[test]
fn test_is_valid_number_empty_is_valid() {
    assert!(is_valid_number(""));
    assert!(is_valid_number("   "));
}

#[test]
fn test_is_valid_number_accepts_plain_numbers() {
    assert!(is_valid_number("12"));
    assert!(is_valid_number("-3"));
    assert!(is_valid_number("1.25"));
    assert!(is_valid_number(".5"));
    assert!(is_valid_number("-0.75"));
    assert!(is_valid_number(" 42 "));
}

#[test]
fn test_is_valid_number_rejects_partial_input() {
    assert!(!is_valid_number("12."));
    assert!(!is_valid_number("abc"));
    assert!(!is_valid_number("1,2"));
    assert!(!is_valid_number("1 2"));
    assert!(!is_valid_number("-"));
    assert!(!is_valid_number("."));
    assert!(!is_valid_number("12abc"));
}

#[test]
fn test_valid_input_always_parses_finite() {
    for input in ["", "12", "-3", "1.25", ".5", "-0.75", "0"] {
        assert!(is_valid_number(input));
        let parsed = parse_number(input);
        assert!(parsed.is_finite(), "'{input}' parsed to {parsed}");
    }
    assert_eq!(parse_number(""), 0.0);
}

#[test]
fn test_parse_number_never_fails() {
    assert_eq!(parse_number("abc"), 0.0);
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("12"), 12.0);
    assert_eq!(parse_number("-2.5"), -2.5);
}

#[test]
fn test_parse_number_takes_leading_prefix() {
    assert_eq!(parse_number("12abc"), 12.0);
    assert_eq!(parse_number("3.5kg"), 3.5);
    assert_eq!(parse_number("-1.5x2"), -1.5);
}

#[test]
fn test_parse_number_incomplete_exponent_stops_at_mantissa() {
    assert_eq!(parse_number("12e"), 12.0);
    assert_eq!(parse_number("12e+"), 12.0);
    assert_eq!(parse_number("12e3"), 12000.0);
}

#[test]
fn test_parse_prefix_none_for_non_numeric() {
    assert_eq!(parse_prefix("abc"), None);
    assert_eq!(parse_prefix(""), None);
    assert_eq!(parse_prefix("-"), None);
    assert_eq!(parse_prefix("10"), Some(10.0));
}

#[test]
fn test_safe_sum_empty_is_zero() {
    assert_eq!(safe_sum([]), 0.0);
}

#[test]
fn test_safe_sum_counts_invalid_as_zero() {
    assert_eq!(safe_sum(["10", "abc", "", "20"]), 30.0);
    assert_eq!(safe_sum(["1.5", "2.5"]), 4.0);
}

#[test]
fn test_safe_avg_empty_is_zero() {
    assert_eq!(safe_avg([]), 0.0);
}

#[test]
fn test_safe_avg_excludes_unparseable_values() {
    // Only "10" and "20" qualify; "abc" and empties are excluded entirely.
    assert_eq!(safe_avg(["10", "abc", "", "20"]), 15.0);
}

#[test]
fn test_safe_avg_all_invalid_is_zero() {
    assert_eq!(safe_avg(["abc", "", "xyz"]), 0.0);
}

#[test]
fn test_to_fixed2() {
    assert_eq!(to_fixed2(0.0), "0.00");
    assert_eq!(to_fixed2(2.5), "2.50");
    assert_eq!(to_fixed2(2.666_666_7), "2.67");
    assert_eq!(to_fixed2(-1.005e1), "-10.05");
}

#[test]
fn test_to_integer_rounds_half_away_from_zero() {
    assert_eq!(to_integer(2.4), 2);
    assert_eq!(to_integer(2.5), 3);
    assert_eq!(to_integer(-2.4), -2);
    assert_eq!(to_integer(0.0), 0);
}
