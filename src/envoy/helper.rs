//! Helper functions for normalizing Envoy value tokens.
//!
//! The Envoy renders power and energy with a unit suffix in varying case
//! ("92.8 W", "1.5 kW", "11.7 kWh", "81.1 MWh"). These functions strip the
//! suffix and scale the number to watts or watt-hours.

use crate::error::ParseError;

/// Suffix/multiplier pairs for power, longest suffix first.
const POWER_UNITS: &[(&str, f64)] = &[("KW", 1_000.0), ("W", 1.0)];

/// Suffix/multiplier pairs for energy, longest suffix first.
const ENERGY_UNITS: &[(&str, f64)] = &[("MWH", 1_000_000.0), ("KWH", 1_000.0), ("WH", 1.0)];

/// Parses a power token into watts: "92.8 W" is 92.8 and "1.5 kW" is 1500.
pub fn parse_power(raw: &str) -> Result<f64, ParseError> {
    parse_with_units(raw, POWER_UNITS)
}

/// Parses an energy token into watt-hours.
///
/// "MWH" is tested before "KWH" and "WH" so a longer suffix is never read as a
/// shorter one.
pub fn parse_energy(raw: &str) -> Result<f64, ParseError> {
    parse_with_units(raw, ENERGY_UNITS)
}

/// Strict base-10 integer parse of the trimmed token.
pub fn parse_int(raw: &str) -> Result<i64, ParseError> {
    let text = raw.trim();
    text.parse::<i64>()
        .map_err(|e| ParseError::number_parse(text, e))
}

fn parse_with_units(raw: &str, units: &[(&str, f64)]) -> Result<f64, ParseError> {
    let normalized = raw.trim().to_uppercase();
    let (number, multiplier) = units
        .iter()
        .find_map(|(suffix, multiplier)| {
            normalized
                .strip_suffix(suffix)
                .map(|number| (number, *multiplier))
        })
        .ok_or_else(|| ParseError::UnknownUnit(raw.to_string()))?;

    parse_finite(number.trim()).map(|value| value * multiplier)
}

fn parse_finite(text: &str) -> Result<f64, ParseError> {
    let value = text
        .parse::<f64>()
        .map_err(|e| ParseError::number_parse(text, e))?;
    if !value.is_finite() {
        return Err(ParseError::number_parse(text, "not a finite number"));
    }
    Ok(value)
}
