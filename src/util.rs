// Utility helpers for parsing, rounding, and number formatting.
//
// This module centralizes all the "dirty" CSV/number/date handling so the
// rest of the code can assume clean, typed values.
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Extract `(year, month)` from a date string, trying the formats the four
/// sources actually use, in order:
///
/// 1. `YYYY-MM-DD` (carbon, disasters)
/// 2. `DD/MM/YYYY` (older carbon exports)
/// 3. `YYYY-MM-DD HH:MM:SS` (commentary timestamps)
pub fn parse_year_month_safe(s: Option<&str>) -> Option<(i32, u32)> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((d.year(), d.month()));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some((d.year(), d.month()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some((dt.year(), dt.month()));
    }
    None
}

/// Round to 3 decimal places. Emission values are stored and exported at
/// this precision.
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Apply the first matching rename from a `(from, to)` table, passing
/// unmatched names through unchanged. Applying the table twice is a no-op
/// as long as no `to` name appears as a `from` name.
pub fn apply_renames(name: &str, renames: &[(&str, &str)]) -> String {
    for (from, to) in renames {
        if name == *from {
            return (*to).to_string();
        }
    }
    name.to_string()
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_plain_and_comma_numbers() {
        assert_eq!(parse_f64_safe(Some("1234.5")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("1,234.5")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some(" 42 ")), Some(42.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn year_month_tries_all_formats() {
        assert_eq!(parse_year_month_safe(Some("2019-03-15")), Some((2019, 3)));
        assert_eq!(parse_year_month_safe(Some("15/03/2019")), Some((2019, 3)));
        assert_eq!(
            parse_year_month_safe(Some("2020-11-02 17:45:09")),
            Some((2020, 11))
        );
        assert_eq!(parse_year_month_safe(Some("March 2019")), None);
        assert_eq!(parse_year_month_safe(None), None);
    }

    #[test]
    fn round3_is_exact_at_three_decimals() {
        assert_relative_eq!(round3(1.23456), 1.235);
        assert_relative_eq!(round3(-0.0004), -0.0);
        assert_relative_eq!(round3(2.0006), 2.001);
        assert_relative_eq!(round3(7.0), 7.0);
    }

    #[test]
    fn renames_are_idempotent() {
        let renames = [
            ("Russian Federation (the)", "Russian"),
            ("United States of America (the)", "United States"),
        ];
        let once = apply_renames("Russian Federation (the)", &renames);
        assert_eq!(once, "Russian");
        let twice = apply_renames(&once, &renames);
        assert_eq!(twice, "Russian");
        assert_eq!(apply_renames("France", &renames), "France");
    }

    #[test]
    fn average_handles_empty() {
        assert_relative_eq!(average(&[]), 0.0);
        assert_relative_eq!(average(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
        assert_eq!(format_int(9855u64), "9,855");
    }
}
