//! Display formatting for metric values and deltas.

use crate::models::Delta;

/// Groups the digits of `n` in threes with commas, e.g. `-1234567` becomes
/// `-1,234,567`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub fn format_value(value: f64, is_percentage: bool) -> String {
    if is_percentage {
        format!("{value:.1}%")
    } else {
        format_thousands(value.round() as i64)
    }
}

/// Formats a week-over-week change with an explicit sign. Returns `None` when
/// there is nothing to compare against.
pub fn format_delta(delta: Delta, is_percentage: bool) -> Option<String> {
    let value = delta.value()?;
    if is_percentage {
        return Some(format!("{value:+.1}%"));
    }
    let rounded = value.round() as i64;
    let sign = if rounded < 0 { "" } else { "+" };
    Some(format!("{sign}{}", format_thousands(rounded)))
}

/// Annotation for flow metrics shown as "this week's additions".
pub fn format_new(value: f64) -> String {
    format!("+{} new", format_thousands(value.round() as i64))
}
