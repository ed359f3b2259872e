//! Decimal arithmetic on decimal strings
//!
//! Fixed-point helpers with bcmath-style semantics: every operand is parsed
//! exactly, results are truncated toward zero to the requested scale. Binary
//! floating point is never involved.

use crate::error::ArithmeticError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::str::FromStr;

/// Parse a decimal string (surrounding whitespace is ignored)
pub fn parse(value: &str) -> Result<Decimal, ArithmeticError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArithmeticError::InvalidDecimal(value.to_string()));
    }
    Decimal::from_str(trimmed).map_err(|_| ArithmeticError::InvalidDecimal(value.to_string()))
}

/// Whether the string holds a decimal number
pub fn is_numeric(value: &str) -> bool {
    parse(value).is_ok()
}

/// Truncate toward zero to `scale` decimal digits
#[inline]
pub fn truncate(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::ToZero)
}

/// Compare two decimals at `scale` digits of precision.
///
/// Digits beyond `scale` are dropped from both operands first, so
/// `1.239` and `1.23` are equal at scale 2.
pub fn compare_decimal(a: Decimal, b: Decimal, scale: u32) -> Ordering {
    truncate(a, scale).cmp(&truncate(b, scale))
}

/// Compare two decimal strings at `scale` digits of precision
pub fn compare(a: &str, b: &str, scale: u32) -> Result<Ordering, ArithmeticError> {
    Ok(compare_decimal(parse(a)?, parse(b)?, scale))
}

/// `a + b`, truncated to `scale`
pub fn add(a: &str, b: &str, scale: u32) -> Result<String, ArithmeticError> {
    let sum = parse(a)?
        .checked_add(parse(b)?)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(format_scaled(sum, scale))
}

/// `a - b`, truncated to `scale`
pub fn subtract(a: &str, b: &str, scale: u32) -> Result<String, ArithmeticError> {
    let diff = parse(a)?
        .checked_sub(parse(b)?)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(format_scaled(diff, scale))
}

/// `a * b`, truncated to `scale`
pub fn multiply(a: &str, b: &str, scale: u32) -> Result<String, ArithmeticError> {
    let product = parse(a)?
        .checked_mul(parse(b)?)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(format_scaled(product, scale))
}

/// `a / b`, truncated to `scale`
pub fn divide(a: &str, b: &str, scale: u32) -> Result<String, ArithmeticError> {
    let divisor = parse(b)?;
    if divisor.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    let quotient = parse(a)?
        .checked_div(divisor)
        .ok_or(ArithmeticError::Overflow)?;
    Ok(format_scaled(quotient, scale))
}

/// Number of digits after the decimal point, as written.
///
/// `"0.25"` → 2, `"0.10"` → 2, `"1"` → 0. Used to derive the comparison
/// scale from a quantity step.
pub fn decimal_digits(value: &str) -> u32 {
    match value.trim().split_once('.') {
        Some((_, fraction)) => fraction.chars().take_while(char::is_ascii_digit).count() as u32,
        None => 0,
    }
}

/// Render with exactly `scale` fractional digits
fn format_scaled(value: Decimal, scale: u32) -> String {
    let mut value = truncate(value, scale);
    value.rescale(scale);
    value.to_string()
}
