//! Temperature conversions
//!
//! Celsius, Fahrenheit and Kelvin are related by affine maps (scale plus
//! offset), so they cannot share a single base factor. Instead each ordered
//! pair of units has an explicit rule.

use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use unitconv_core::{Category, ConversionError};

/// Absolute zero offset between Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;

/// Offset of the Fahrenheit scale at 0 °C
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = unitconv_core::normalize_name(s);
        TemperatureUnit::ALL
            .into_iter()
            .find(|u| u.name() == name)
            .ok_or_else(|| ConversionError::unknown_units(Category::Temperature, [name.clone()]))
    }
}

/// The formula applied by a temperature rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    Identity,
    CelsiusToFahrenheit,
    CelsiusToKelvin,
    FahrenheitToCelsius,
    FahrenheitToKelvin,
    KelvinToCelsius,
    KelvinToFahrenheit,
}

impl Formula {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Formula::Identity => value,
            Formula::CelsiusToFahrenheit => value * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
            Formula::CelsiusToKelvin => value + KELVIN_OFFSET,
            Formula::FahrenheitToCelsius => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
            Formula::FahrenheitToKelvin => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0 + KELVIN_OFFSET,
            Formula::KelvinToCelsius => value - KELVIN_OFFSET,
            Formula::KelvinToFahrenheit => (value - KELVIN_OFFSET) * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
        }
    }
}

/// A conversion rule for one ordered pair of temperature units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRule {
    pub from: TemperatureUnit,
    pub to: TemperatureUnit,
    pub formula: Formula,
}

impl TemperatureRule {
    pub const fn new(from: TemperatureUnit, to: TemperatureUnit, formula: Formula) -> Self {
        TemperatureRule { from, to, formula }
    }
}

use TemperatureUnit::{Celsius, Fahrenheit, Kelvin};

/// The nine rules, identities included
pub const TEMPERATURE_RULES: [TemperatureRule; 9] = [
    TemperatureRule::new(Celsius, Celsius, Formula::Identity),
    TemperatureRule::new(Celsius, Fahrenheit, Formula::CelsiusToFahrenheit),
    TemperatureRule::new(Celsius, Kelvin, Formula::CelsiusToKelvin),
    TemperatureRule::new(Fahrenheit, Celsius, Formula::FahrenheitToCelsius),
    TemperatureRule::new(Fahrenheit, Fahrenheit, Formula::Identity),
    TemperatureRule::new(Fahrenheit, Kelvin, Formula::FahrenheitToKelvin),
    TemperatureRule::new(Kelvin, Celsius, Formula::KelvinToCelsius),
    TemperatureRule::new(Kelvin, Fahrenheit, Formula::KelvinToFahrenheit),
    TemperatureRule::new(Kelvin, Kelvin, Formula::Identity),
];

/// Rule table for the temperature category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRules {
    rules: Vec<TemperatureRule>,
}

impl TemperatureRules {
    pub fn new(rules: Vec<TemperatureRule>) -> Self {
        TemperatureRules { rules }
    }

    /// Units that appear in at least one rule, in first-seen order
    pub fn units(&self) -> Vec<TemperatureUnit> {
        let mut units = Vec::new();
        for rule in &self.rules {
            for unit in [rule.from, rule.to] {
                if !units.contains(&unit) {
                    units.push(unit);
                }
            }
        }
        units
    }

    pub fn rule(&self, from: TemperatureUnit, to: TemperatureUnit) -> Option<&TemperatureRule> {
        self.rules.iter().find(|r| r.from == from && r.to == to)
    }

    /// Apply the rule for (from, to)
    pub fn convert(&self, value: f64, from: TemperatureUnit, to: TemperatureUnit) -> Result<f64, ConversionError> {
        match self.rule(from, to) {
            Some(rule) => Ok(rule.formula.apply(value)),
            None => {
                tracing::error!(%from, %to, "no temperature rule for pair");
                Err(ConversionError::UnsupportedTemperatureConversion {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }

    /// Check that every ordered pair of known units has exactly one rule
    pub fn validate(&self) -> Result<(), ConversionError> {
        let units = self.units();
        if units.len() < 2 {
            return Err(ConversionError::InvalidTable(
                "temperature needs at least two units".to_string(),
            ));
        }
        for &from in &units {
            for &to in &units {
                let count = self.rules.iter().filter(|r| r.from == from && r.to == to).count();
                if count != 1 {
                    return Err(ConversionError::InvalidTable(format!(
                        "temperature pair {} -> {} has {} rules",
                        from, to, count
                    )));
                }
                let rule = self.rules.iter().find(|r| r.from == from && r.to == to);
                if from == to && rule.map(|r| r.formula) != Some(Formula::Identity) {
                    return Err(ConversionError::InvalidTable(format!(
                        "temperature pair {} -> {} must be the identity",
                        from, to
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for TemperatureRules {
    fn default() -> Self {
        TemperatureRules::new(TEMPERATURE_RULES.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fixed_points() {
        let rules = TemperatureRules::default();
        assert_eq!(rules.convert(0.0, Celsius, Fahrenheit).unwrap(), 32.0);
        assert_eq!(rules.convert(100.0, Celsius, Fahrenheit).unwrap(), 212.0);
        assert_eq!(rules.convert(0.0, Celsius, Kelvin).unwrap(), 273.15);
        assert_eq!(rules.convert(32.0, Fahrenheit, Celsius).unwrap(), 0.0);
        assert_eq!(rules.convert(273.15, Kelvin, Celsius).unwrap(), 0.0);
    }

    #[test]
    fn test_fahrenheit_kelvin() {
        let rules = TemperatureRules::default();
        assert!(approx_eq(rules.convert(32.0, Fahrenheit, Kelvin).unwrap(), 273.15));
        assert!(approx_eq(rules.convert(373.15, Kelvin, Fahrenheit).unwrap(), 212.0));
    }

    #[test]
    fn test_minus_forty_is_shared() {
        let rules = TemperatureRules::default();
        assert!(approx_eq(rules.convert(-40.0, Celsius, Fahrenheit).unwrap(), -40.0));
        assert!(approx_eq(rules.convert(-40.0, Fahrenheit, Celsius).unwrap(), -40.0));
    }

    #[test]
    fn test_identity_pairs() {
        let rules = TemperatureRules::default();
        for unit in TemperatureUnit::ALL {
            assert_eq!(rules.convert(-12.345, unit, unit).unwrap(), -12.345);
        }
    }

    #[test]
    fn test_default_rules_validate() {
        let rules = TemperatureRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.units(), TemperatureUnit::ALL.to_vec());
    }

    #[test]
    fn test_missing_rule_is_reported() {
        let partial: Vec<_> = TEMPERATURE_RULES
            .into_iter()
            .filter(|r| !(r.from == Kelvin && r.to == Fahrenheit))
            .collect();
        let rules = TemperatureRules::new(partial);

        assert!(matches!(rules.validate(), Err(ConversionError::InvalidTable(_))));
        let err = rules.convert(300.0, Kelvin, Fahrenheit).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedTemperatureConversion { .. }));
        assert!(err.is_internal());
    }

    #[test]
    fn test_non_identity_self_rule_rejected() {
        let mut bad = TEMPERATURE_RULES.to_vec();
        bad[0] = TemperatureRule::new(Celsius, Celsius, Formula::CelsiusToKelvin);
        assert!(TemperatureRules::new(bad).validate().is_err());
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("Kelvin".parse::<TemperatureUnit>().unwrap(), Kelvin);
        assert!("rankine".parse::<TemperatureUnit>().is_err());
    }
}
