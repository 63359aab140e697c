//! Label formatters for axis ticks and tooltips.

use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Axis date labels, e.g. `01/02/21`.
pub const AXIS_DATE_FORMAT: &str = "%m/%d/%y";
/// Tooltip date labels, e.g. `Jan 2, 2021`.
pub const TOOLTIP_DATE_FORMAT: &str = "%b %-d, %Y";

const SUFFIXES: [(f64, &str); 4] = [(1.0e3, "k"), (1.0e6, "m"), (1.0e9, "b"), (1.0e12, "t")];

/// Abbreviated tick label: `1200 -> "1.2k"`, `3_400_000 -> "3.4m"`, `-2500 -> "-2.5k"`.
/// Values that round below a thousand are shown as whole numbers.
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return "NA".to_string();
    }
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let whole = abs.round();
    if whole == 0.0 {
        return "0".to_string();
    }
    if whole < 1000.0 {
        return format!("{sign}{whole:.0}");
    }

    // Smallest unit whose one-decimal mantissa stays under 1000, so 999.6 is
    // "1k" and 999_960 is "1m". Anything past the last unit keeps its suffix.
    let (last_unit, last_suffix) = SUFFIXES[SUFFIXES.len() - 1];
    let (scaled, suffix) = SUFFIXES
        .iter()
        .map(|(unit, suffix)| ((abs / unit * 10.0).round() / 10.0, *suffix))
        .find(|(scaled, _)| *scaled < 1000.0)
        .unwrap_or(((abs / last_unit * 10.0).round() / 10.0, last_suffix));
    format!("{sign}{}{suffix}", trim_decimal(scaled))
}

fn trim_decimal(v: f64) -> String {
    let s = format!("{v:.1}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Tooltip value with explicit sign and thousands separators: `+1,234`, `-56`, `+0`.
pub fn signed_thousands(value: i64) -> String {
    let sign = if value < 0 { '-' } else { '+' };
    format!("{sign}{}", value.unsigned_abs().to_formatted_string(&Locale::en))
}

pub fn axis_date(date: &NaiveDate) -> String {
    date.format(AXIS_DATE_FORMAT).to_string()
}

pub fn tooltip_date(date: &NaiveDate) -> String {
    date.format(TOOLTIP_DATE_FORMAT).to_string()
}
