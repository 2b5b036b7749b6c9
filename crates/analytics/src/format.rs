//! Human-readable number formatting. Locale-insensitive.

use crate::round2;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `1234 -> "1.2K"`, `1_500_000 -> "1.5M"`, `12.34 -> "12.3"`. The unit is
/// picked after rounding to one decimal, so `999_950` prints as `"1.0M"`.
pub fn format_compact(value: f64) -> String {
    let thousands = round1(value / 1_000.0);
    if thousands.abs() >= 1_000.0 {
        format!("{:.1}M", round1(value / 1_000_000.0))
    } else if round1(value).abs() >= 1_000.0 {
        format!("{:.1}K", thousands)
    } else {
        format!("{}", round1(value))
    }
}

/// `12.345 -> "12.35%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round2(value))
}

/// `95 -> "1m 35s"`, `45 -> "45s"`, `3900 -> "1h 5m"`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// `12.5 -> "$12.50"`
pub fn format_currency(value: f64) -> String {
    let rounded = round2(value);
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}
