//! Percentage and decimal helpers shared by all engines.
//!
//! # Invariants
//! - Division by zero never faults; it yields `0`.
//! - Rounding is exact round-half-up on the rational value, never floor/ceil.
//! - Decimal parsing never fails; unparsable text yields `0.0`.

use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\+?((?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid decimal regex")
});

/// Returns `numerator / denominator` as a whole percent, rounded half-up.
///
/// Returns `0` when `denominator == 0`.
pub fn rounded_percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let numerator = u128::from(numerator);
    let denominator = u128::from(denominator);
    let rounded = (numerator * 200 + denominator) / (denominator * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Parses the leading decimal number of `text`, falling back to `0.0`.
///
/// Accepts surrounding whitespace and trailing garbage (`"8.5 sgpa"` -> 8.5).
/// Negative and non-finite values are rejected and also yield `0.0`.
pub fn parse_decimal(text: &str) -> f64 {
    let Some(captures) = DECIMAL_PREFIX_RE.captures(text) else {
        return 0.0;
    };
    match captures[1].parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}
