//! Time and token parsing helpers for stored tier settings
//!
//! All conversions to the business timezone happen here; the evaluator only
//! sees naive local values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use shared::{PricingError, PricingResult};

/// Parse a time of day (HH:MM or HH:MM:SS)
pub fn parse_time(value: &str) -> PricingResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| PricingError::InvalidTime(value.to_string()))
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> PricingResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PricingError::InvalidDate(value.to_string()))
}

/// Parse a weekday name, case-insensitive, full or abbreviated ("Monday", "mon")
pub fn parse_weekday(value: &str) -> PricingResult<Weekday> {
    let value = value.trim();
    value
        .parse::<Weekday>()
        .map_err(|_| PricingError::InvalidWeekday(value.to_string()))
}

/// Parse an IANA timezone name ("Europe/Madrid")
pub fn parse_timezone(name: &str) -> PricingResult<Tz> {
    let name = name.trim();
    name.parse::<Tz>()
        .map_err(|_| PricingError::InvalidTimezone(name.to_string()))
}

/// Wall-clock time in the business timezone
pub fn to_business_time(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Split a newline-separated list into trimmed, non-empty tokens.
///
/// Returns `None` when no token remains (an empty list is unconstrained).
pub fn parse_token_list(value: &str) -> Option<Vec<String>> {
    let tokens: Vec<String> = value
        .lines()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    (!tokens.is_empty()).then_some(tokens)
}
