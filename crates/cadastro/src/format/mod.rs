//! Display formatting for amounts, dates and generated identifiers.

pub mod email;
pub mod id;

pub use email::validate_email;
pub use id::{generate_id, generate_matricula, generate_professor_id, IdConfig};

use crate::util::Date;

/// Currency symbol prefix, followed by a space.
const CURRENCY_PREFIX: &str = "R$ ";

/// Formats an amount in reais: `R$ 1.250,00`.
///
/// Uses `.` as thousands separator and `,` as decimal separator, always two
/// decimal places. Negative amounts are rendered as `-R$ 1.250,00`. NaN and
/// infinities don't fail; they render as `R$ NaN` and `R$ ∞`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{CURRENCY_PREFIX}NaN");
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}{CURRENCY_PREFIX}∞");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    // A value that rounds to zero is never shown as negative.
    let sign = if int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0') {
        ""
    } else {
        sign
    };

    format!(
        "{sign}{CURRENCY_PREFIX}{},{frac_part}",
        group_thousands(int_part)
    )
}

/// Inserts `.` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Parses an amount typed into a form.
///
/// Accepts plain decimals (`1250.00`) and Brazilian notation with or
/// without the currency symbol (`1.250,00`, `R$ 1.250,00`). When a comma is
/// present it is the decimal separator and dots are thousands separators;
/// otherwise a dot is the decimal separator.
pub fn parse_currency(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let body = rest.strip_prefix("R$").unwrap_or(rest).trim();
    if body.is_empty() || body.starts_with(['-', '+']) {
        return None;
    }

    let normalized = if body.contains(',') {
        body.replace('.', "").replace(',', ".")
    } else {
        body.to_string()
    };
    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: Date) -> String {
    date.to_short_br()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date_iso(date: Date) -> String {
    date.to_iso()
}
