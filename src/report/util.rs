use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;

/// Local-time rendering used by the list table and the CSV export.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Two decimal places with thousand separators, no currency symbol.
/// e.g. `-1234567.8` → `"-1,234,567.80"`
pub(crate) fn group_thousands(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs().round_dp(2));
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val.round_dp(2) < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{with_commas}.{dec_part}")
}

/// Dollar-prefixed amount, e.g. `1234.5` → `"$1,234.50"`, `-3` → `"-$3.00"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let grouped = group_thousands(val);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${grouped}"),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}
