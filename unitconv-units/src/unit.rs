//! Unit representation with conversion factors

use std::fmt;
use serde::Serialize;

/// A unit of a linear category, expressed as a ratio to the category's base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDefinition {
    /// The unit name, lowercase (e.g. "meter", "pound")
    pub name: &'static str,
    /// How many base units one of this unit equals (value_base = value * factor)
    pub factor: f64,
}

impl UnitDefinition {
    pub const fn new(name: &'static str, factor: f64) -> Self {
        UnitDefinition { name, factor }
    }

    /// Check if this is the category's base unit
    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }

    /// Convert a value from this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Convert a value from the base unit to this unit
    pub fn from_base(&self, value_base: f64) -> f64 {
        value_base / self.factor
    }

    /// Convert a value from this unit to another unit of the same category
    pub fn convert_to(&self, value: f64, target: &UnitDefinition) -> f64 {
        if self.name == target.name {
            return value;
        }
        target.from_base(self.to_base(value))
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METER: UnitDefinition = UnitDefinition::new("meter", 1.0);
    const KILOMETER: UnitDefinition = UnitDefinition::new("kilometer", 1000.0);
    const INCH: UnitDefinition = UnitDefinition::new("inch", 0.0254);

    #[test]
    fn test_base_unit() {
        assert!(METER.is_base());
        assert!(!KILOMETER.is_base());
    }

    #[test]
    fn test_to_base_conversion() {
        assert_eq!(KILOMETER.to_base(5.0), 5000.0);
    }

    #[test]
    fn test_from_base_conversion() {
        assert_eq!(KILOMETER.from_base(5000.0), 5.0);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(METER.convert_to(5000.0, &KILOMETER), 5.0);
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(INCH.convert_to(0.1, &INCH), 0.1);
    }
}
