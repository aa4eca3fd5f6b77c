//! Display formatting for money amounts.

use rust_decimal::Decimal;

const DISPLAY_PRECISION: u32 = 2;
const GROUPING_SEPARATOR: char = ',';

/// Formats `value` with two decimals and thousands grouping, e.g. `-1,234.50`.
pub fn format_number(value: Decimal) -> String {
    let rounded = value.round_dp(DISPLAY_PRECISION);
    let body = format!("{:.*}", DISPLAY_PRECISION as usize, rounded.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), ""));
    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, GROUPING_SEPARATOR));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Prefixes the formatted number with `symbol`, e.g. `₱1,000.00` or `₱-250.50`.
pub fn format_money(symbol: &str, value: Decimal) -> String {
    format!("{}{}", symbol, format_number(value))
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
