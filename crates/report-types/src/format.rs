//! Locale display formatting (fr-FR).
//!
//! Pure, fail-soft helpers: a value that does not parse is returned
//! verbatim, never an error. Layout code relies on this to keep rendering
//! even with malformed service data.

/// Placeholder shown for an absent date.
pub const DATE_PLACEHOLDER: &str = "—";

const GROUP_SEPARATOR: char = '\u{202F}'; // narrow no-break space
const CURRENCY_SUFFIX: &str = "\u{00A0}€";

/// Formats a decimal string as a French euro amount, e.g. `"4500.5"` →
/// `"4 500,50 €"`. A string that does not parse as a finite number is
/// returned unchanged.
pub fn format_currency(value: &str) -> String {
    let n: f64 = match value.trim().parse() {
        Ok(n) => n,
        Err(_) => return value.to_string(),
    };
    if !n.is_finite() {
        return value.to_string();
    }

    let cents = (n.abs() * 100.0).round() as u128;
    let units = cents / 100;
    let fraction = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02}{CURRENCY_SUFFIX}")
}

/// Reorders an ISO `YYYY-MM-DD` string into `DD/MM/YYYY`.
///
/// Purely positional: no calendar validation, an out-of-range component is
/// reordered as-is. `None` or an empty string yields the placeholder; a
/// string that is not three dash-separated parts passes through verbatim.
pub fn format_date(date: Option<&str>) -> String {
    let date = match date {
        Some(d) if !d.is_empty() => d,
        _ => return DATE_PLACEHOLDER.to_string(),
    };
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}/{month}/{year}"),
        _ => date.to_string(),
    }
}
