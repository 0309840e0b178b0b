use std::fmt;

use serde::{Deserialize, Serialize};

/// A value with a unit as shown on the canvas, e.g. `100 kOhm` or `0.0200 A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// The value expressed in the base unit, `None` if the unit is not understood.
    pub fn base_value(&self) -> Option<f64> {
        let (suffix, rest) = ValueSuffix::split(&self.unit);
        BaseUnit::from_str(rest)?;
        Some(self.value * suffix.map_or(1.0, |s| s.scale()))
    }

    pub fn base_unit(&self) -> Option<BaseUnit> {
        let (_, rest) = ValueSuffix::split(&self.unit);
        BaseUnit::from_str(rest)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUnit {
    Ohm,
    Volt,
    Ampere,
}

impl BaseUnit {
    pub fn from_str(s: &str) -> Option<BaseUnit> {
        match s {
            "Ohm" | "ohm" | "Ω" => Some(BaseUnit::Ohm),
            "V" => Some(BaseUnit::Volt),
            "A" => Some(BaseUnit::Ampere),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSuffix {
    Tera,
    Giga,
    Mega,
    Kilo,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
}

impl ValueSuffix {
    /// Splits an SI prefix off the front of a unit. Prefixes are case
    /// sensitive: `M`/`Meg` is mega and `m` is milli.
    pub fn split(unit: &str) -> (Option<ValueSuffix>, &str) {
        if BaseUnit::from_str(unit).is_some() {
            return (None, unit);
        }
        if let Some(rest) = unit.strip_prefix("Meg") {
            return (Some(ValueSuffix::Mega), rest);
        }
        let mut chars = unit.chars();
        let suffix = match chars.next() {
            Some('T') => ValueSuffix::Tera,
            Some('G') => ValueSuffix::Giga,
            Some('M') => ValueSuffix::Mega,
            Some('k') | Some('K') => ValueSuffix::Kilo,
            Some('m') => ValueSuffix::Milli,
            Some('u') | Some('µ') => ValueSuffix::Micro,
            Some('n') => ValueSuffix::Nano,
            Some('p') => ValueSuffix::Pico,
            Some('f') => ValueSuffix::Femto,
            Some('a') => ValueSuffix::Atto,
            _ => return (None, unit),
        };
        (Some(suffix), chars.as_str())
    }

    pub fn scale(&self) -> f64 {
        match self {
            ValueSuffix::Tera => 1e12,
            ValueSuffix::Giga => 1e9,
            ValueSuffix::Mega => 1e6,
            ValueSuffix::Kilo => 1e3,
            ValueSuffix::Milli => 1e-3,
            ValueSuffix::Micro => 1e-6,
            ValueSuffix::Nano => 1e-9,
            ValueSuffix::Pico => 1e-12,
            ValueSuffix::Femto => 1e-15,
            ValueSuffix::Atto => 1e-18,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, "kOhm", 100e3)]
    #[case(10.0, "kV", 10e3)]
    #[case(2.0, "MOhm", 2e6)]
    #[case(2.0, "MegOhm", 2e6)]
    #[case(5.0, "mA", 5e-3)]
    #[case(3.0, "µA", 3e-6)]
    #[case(1.5, "V", 1.5)]
    #[case(4.0, "A", 4.0)]
    #[case(7.0, "Ohm", 7.0)]
    fn test_base_value(#[case] value: f64, #[case] unit: &str, #[case] expected: f64) {
        let base = Quantity::new(value, unit).base_value().expect("known unit");
        assert!((base - expected).abs() <= expected.abs() * 1e-12);
    }

    #[rstest]
    #[case("kHz")]
    #[case("")]
    #[case("x")]
    fn test_unknown_unit(#[case] unit: &str) {
        assert_eq!(Quantity::new(1.0, unit).base_value(), None);
    }

    #[test]
    fn test_base_unit_lookup() {
        assert_eq!(Quantity::new(1.0, "kOhm").base_unit(), Some(BaseUnit::Ohm));
        assert_eq!(Quantity::new(1.0, "mV").base_unit(), Some(BaseUnit::Volt));
    }
}
