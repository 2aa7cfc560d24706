// Numeric parsing for values typed into the form as text
use crate::patterns::DECIMAL_NUMBER;

/// Parses a lab value or well measurement
///
/// Blank or non-numeric text yields `None`; callers treat that as "no data".
/// A decimal comma is accepted ("7,2" reads as 7.2).
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !DECIMAL_NUMBER.is_match(trimmed) {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a declared annual volume, which must be zero or positive
pub fn parse_volume(raw: &str) -> Option<f64> {
    parse_measurement(raw).filter(|volume| *volume >= 0.0)
}

/// Returns true when a text field holds something other than whitespace
pub fn is_filled(value: Option<&str>) -> bool {
    value.map_or(false, |v| !v.trim().is_empty())
}
