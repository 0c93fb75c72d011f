//! The conversion table: every category with its units
//!
//! Linear categories map unit names to a factor relative to a base unit.
//! Temperature holds the explicit rule table instead.

use serde::Serialize;
use unitconv_core::{Category, ConversionError};
use crate::UnitDefinition;
use crate::temperature::TemperatureRules;

/// Units of a linear category, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearTable {
    units: Vec<UnitDefinition>,
}

impl LinearTable {
    pub fn new(units: Vec<UnitDefinition>) -> Self {
        LinearTable { units }
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.name == name)
    }

    /// The unit whose factor is 1.0
    pub fn base(&self) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.is_base())
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    fn validate(&self, category: Category) -> Result<(), ConversionError> {
        for (i, unit) in self.units.iter().enumerate() {
            if !unit.factor.is_finite() || unit.factor <= 0.0 {
                return Err(ConversionError::InvalidTable(format!(
                    "{}: factor of '{}' must be positive and finite, got {}",
                    category, unit.name, unit.factor
                )));
            }
            if self.units[..i].iter().any(|u| u.name == unit.name) {
                return Err(ConversionError::InvalidTable(format!(
                    "{}: duplicate unit '{}'",
                    category, unit.name
                )));
            }
        }
        let bases = self.units.iter().filter(|u| u.is_base()).count();
        if bases != 1 {
            return Err(ConversionError::InvalidTable(format!(
                "{}: expected exactly one base unit, found {}",
                category, bases
            )));
        }
        Ok(())
    }
}

/// Conversion data for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CategoryTable {
    /// Pure scale conversions through a base unit
    Linear(LinearTable),
    /// Affine conversions through explicit pairwise rules
    Temperature(TemperatureRules),
}

impl CategoryTable {
    /// Unit names in declaration order
    pub fn unit_names(&self) -> Vec<&'static str> {
        match self {
            CategoryTable::Linear(table) => table.units().iter().map(|u| u.name).collect(),
            CategoryTable::Temperature(rules) => rules.units().iter().map(|u| u.name()).collect(),
        }
    }

    pub fn has_unit(&self, name: &str) -> bool {
        match self {
            CategoryTable::Linear(table) => table.get(name).is_some(),
            CategoryTable::Temperature(rules) => rules.units().iter().any(|u| u.name() == name),
        }
    }

    fn validate(&self, category: Category) -> Result<(), ConversionError> {
        let count = self.unit_names().len();
        if count < 2 {
            return Err(ConversionError::InvalidTable(format!(
                "{}: needs at least two units, has {}",
                category, count
            )));
        }
        match self {
            CategoryTable::Linear(table) => table.validate(category),
            CategoryTable::Temperature(rules) => rules.validate(),
        }
    }
}

/// Read-only association of every category with its conversion data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionTable {
    entries: Vec<(Category, CategoryTable)>,
}

impl ConversionTable {
    /// The built-in table
    pub fn builtin() -> Self {
        let mut table = ConversionTable { entries: Vec::new() };
        table.register_length_units();
        table.register_mass_units();
        table.register_temperature_units();
        table.register_time_units();
        table.register_volume_units();
        table
    }

    /// Build a table from explicit entries (no validation)
    pub fn from_entries(entries: Vec<(Category, CategoryTable)>) -> Self {
        ConversionTable { entries }
    }

    pub fn get(&self, category: Category) -> Option<&CategoryTable> {
        self.entries.iter().find(|(c, _)| *c == category).map(|(_, t)| t)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// Check every invariant of the table
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.entries.is_empty() {
            return Err(ConversionError::InvalidTable("no categories".to_string()));
        }
        for (i, (category, table)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(c, _)| c == category) {
                return Err(ConversionError::InvalidTable(format!(
                    "category '{}' registered twice",
                    category
                )));
            }
            if category.is_linear() != matches!(table, CategoryTable::Linear(_)) {
                return Err(ConversionError::InvalidTable(format!(
                    "category '{}' has the wrong kind of table",
                    category
                )));
            }
            table.validate(*category)?;
        }
        Ok(())
    }

    fn register(&mut self, category: Category, table: CategoryTable) {
        self.entries.push((category, table));
    }

    fn register_linear(&mut self, category: Category, units: &[(&'static str, f64)]) {
        let units = units
            .iter()
            .map(|&(name, factor)| UnitDefinition::new(name, factor))
            .collect();
        self.register(category, CategoryTable::Linear(LinearTable::new(units)));
    }

    fn register_length_units(&mut self) {
        // Base: meter
        self.register_linear(Category::Length, &[
            ("meter", 1.0),
            ("kilometer", 1000.0),
            ("centimeter", 0.01),
            ("millimeter", 0.001),
            ("inch", 0.0254),
            ("foot", 0.3048),
            ("yard", 0.9144),
            ("mile", 1609.34),
        ]);
    }

    fn register_mass_units(&mut self) {
        // Base: kilogram
        self.register_linear(Category::Mass, &[
            ("kilogram", 1.0),
            ("gram", 0.001),
            ("milligram", 1e-6),
            ("pound", 0.453592),
            ("ounce", 0.0283495),
        ]);
    }

    fn register_temperature_units(&mut self) {
        self.register(Category::Temperature, CategoryTable::Temperature(TemperatureRules::default()));
    }

    fn register_time_units(&mut self) {
        // Base: second
        self.register_linear(Category::Time, &[
            ("second", 1.0),
            ("minute", 60.0),
            ("hour", 3600.0),
            ("day", 86400.0),
            ("week", 604800.0),
        ]);
    }

    fn register_volume_units(&mut self) {
        // Base: liter
        self.register_linear(Category::Volume, &[
            ("liter", 1.0),
            ("milliliter", 0.001),
            ("gallon", 3.78541),
            ("quart", 0.946353),
            ("pint", 0.473176),
            ("cup", 0.24),
        ]);
    }
}
