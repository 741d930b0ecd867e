//! Display helpers for numbers, durations and dates.

use chrono::DateTime;

/// `10000` -> `"10,000"`
pub fn format_number(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Two decimals with thousands separators: `1234.5` -> `"1,234.50"`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Milliseconds as `M:SS`
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Unix time as a day, e.g. `"14 Nov 2023"`. Out-of-range values render as `"Unknown"`.
pub fn format_date(unix: u64) -> String {
    i64::try_from(unix)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
