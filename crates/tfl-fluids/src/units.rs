//! Unit-tagged text input for state-update values.
//!
//! Values arrive as text such as `"300 K"`, `"2 bar"` or `"250 kJ/kg"` and are
//! converted to the SI value the model consumes. A bare number is taken as SI.

use crate::state::InputKind;
use thiserror::Error;

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number plus optional unit.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unit not recognized for this quantity.
    #[error("Unknown unit '{unit}' for {kind}")]
    UnknownUnit { unit: String, kind: &'static str },

    /// Unit that could mean absolute or gauge.
    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    /// Value outside the physical range of its quantity.
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

impl InputKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Density => "Density",
            Self::Energy => "Specific Energy",
            Self::Pressure => "Pressure",
            Self::Temperature => "Temperature",
            Self::Entropy => "Specific Entropy",
        }
    }
}

/// Parse `text` as a value of `kind` and return it in SI.
pub fn parse_quantity(text: &str, kind: InputKind) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(text)?;
    let unit = unit.to_lowercase();
    match kind {
        InputKind::Temperature => parse_temperature(value, &unit),
        InputKind::Pressure => parse_pressure(value, &unit),
        InputKind::Density => parse_density(value, &unit),
        InputKind::Energy => parse_specific_energy(value, &unit),
        InputKind::Entropy => parse_specific_entropy(value, &unit),
    }
}

fn unknown(unit: &str, kind: InputKind) -> UnitError {
    UnitError::UnknownUnit {
        unit: unit.to_string(),
        kind: kind.name(),
    }
}

/// Kelvin from K, °C, °F or °R.
fn parse_temperature(value: f64, unit: &str) -> Result<f64, UnitError> {
    let kelvin = match unit {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "degc" | "celsius" => value + 273.15,
        "f" | "°f" | "degf" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "degr" | "rankine" => value * 5.0 / 9.0,
        _ => return Err(unknown(unit, InputKind::Temperature)),
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(kelvin)
}

/// Absolute pressure in Pa. Gauge units assume a 1 atm reference.
fn parse_pressure(value: f64, unit: &str) -> Result<f64, UnitError> {
    let pa = match unit {
        "" | "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" => value * 100.0,
        "atm" => value * 101_325.0,
        "psia" => value * 6_894.757,
        "psig" => (value + 14.695_95) * 6_894.757,
        "barg" => (value + 1.013_25) * 1e5,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit: unit.to_string(),
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => return Err(unknown(unit, InputKind::Pressure)),
    };

    if pa < 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "absolute pressure cannot be negative",
        });
    }
    Ok(pa)
}

fn parse_density(value: f64, unit: &str) -> Result<f64, UnitError> {
    let kg_m3 = match unit {
        "" | "kg/m^3" | "kg/m³" | "kg/m3" => value,
        "g/cm^3" | "g/cm³" | "g/cm3" => value * 1e3,
        "g/l" => value,
        "lbm/ft^3" | "lbm/ft3" => value * 16.018_46,
        _ => return Err(unknown(unit, InputKind::Density)),
    };

    if kg_m3 <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kg_m3,
            reason: "density must be positive",
        });
    }
    Ok(kg_m3)
}

/// Specific energy or enthalpy in J/kg. Negative values are allowed.
fn parse_specific_energy(value: f64, unit: &str) -> Result<f64, UnitError> {
    match unit {
        "" | "j/kg" => Ok(value),
        "kj/kg" => Ok(value * 1e3),
        "mj/kg" => Ok(value * 1e6),
        "btu/lbm" => Ok(value * 2_326.0),
        _ => Err(unknown(unit, InputKind::Energy)),
    }
}

fn parse_specific_entropy(value: f64, unit: &str) -> Result<f64, UnitError> {
    match unit {
        "" | "j/kg/k" | "j/(kg·k)" | "j/(kg k)" | "j/(kg*k)" => Ok(value),
        "kj/kg/k" | "kj/(kg·k)" | "kj/(kg k)" | "kj/(kg*k)" => Ok(value * 1e3),
        "btu/lbm/r" | "btu/(lbm·r)" | "btu/(lbm r)" | "btu/(lbm*r)" => Ok(value * 4_186.8),
        _ => Err(unknown(unit, InputKind::Entropy)),
    }
}

/// Split `"14.7 psia"` into `(14.7, "psia")`; a bare number has an empty unit.
fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let trimmed = input.trim();
    let split_idx = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let (num_part, unit_part) = trimmed.split_at(split_idx);

    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| UnitError::Parse(format!("could not parse a number from '{input}'")))?;
    Ok((value, unit_part.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn bare_numbers_are_si() {
        assert_eq!(parse_quantity("300", InputKind::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("2.5e5", InputKind::Energy).unwrap(), 2.5e5);
        assert_eq!(parse_quantity(" 1.2 ", InputKind::Density).unwrap(), 1.2);
    }

    #[test]
    fn temperature_units() {
        assert!(close(parse_quantity("0C", InputKind::Temperature).unwrap(), 273.15));
        assert!(close(parse_quantity("32 F", InputKind::Temperature).unwrap(), 273.15));
        assert!(close(parse_quantity("540 R", InputKind::Temperature).unwrap(), 300.0));
        assert!(matches!(
            parse_quantity("-10 K", InputKind::Temperature),
            Err(UnitError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pressure_units() {
        assert_eq!(parse_quantity("2 bar", InputKind::Pressure).unwrap(), 2e5);
        assert_eq!(parse_quantity("101.325 kPa", InputKind::Pressure).unwrap(), 101_325.0);
        assert!(close(parse_quantity("1 atm", InputKind::Pressure).unwrap(), 101_325.0));
        assert!(matches!(
            parse_quantity("14.7 psi", InputKind::Pressure),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn energy_may_be_negative() {
        assert_eq!(parse_quantity("-150 kJ/kg", InputKind::Energy).unwrap(), -1.5e5);
    }

    #[test]
    fn entropy_units() {
        assert_eq!(parse_quantity("6.9 kJ/kg/K", InputKind::Entropy).unwrap(), 6.9e3);
        assert_eq!(parse_quantity("100 J/(kg K)", InputKind::Entropy).unwrap(), 100.0);
    }

    #[test]
    fn unknown_unit_names_the_quantity() {
        let err = parse_quantity("3 furlongs", InputKind::Density).unwrap_err();
        assert_eq!(err.to_string(), "Unknown unit 'furlongs' for Density");
        assert!(matches!(
            parse_quantity("abc", InputKind::Pressure),
            Err(UnitError::Parse(_))
        ));
    }
}
