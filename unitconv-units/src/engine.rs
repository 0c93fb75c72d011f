//! The conversion engine
//!
//! Owns the immutable conversion table and answers conversion and
//! introspection queries. Category and unit names are normalized (trimmed,
//! lowercased) before lookup, so callers may pass raw user input.

use unitconv_core::{normalize_name, Category, ConversionError};
use crate::suggest;
use crate::table::{CategoryTable, ConversionTable};
use crate::temperature::TemperatureUnit;

/// Validated, read-only unit converter
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    table: ConversionTable,
}

impl ConversionEngine {
    /// Build the engine over the built-in table
    pub fn new() -> Result<Self, ConversionError> {
        Self::with_table(ConversionTable::builtin())
    }

    /// Build the engine over an explicit table, validating it first
    pub fn with_table(table: ConversionTable) -> Result<Self, ConversionError> {
        if let Err(e) = table.validate() {
            tracing::error!(error = %e, "conversion table rejected");
            return Err(e);
        }
        tracing::debug!(categories = table.categories().count(), "conversion engine ready");
        Ok(ConversionEngine { table })
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// Resolve a category name against the table
    pub fn category(&self, name: &str) -> Result<Category, ConversionError> {
        let category: Category = name.parse()?;
        if self.table.get(category).is_some() {
            Ok(category)
        } else {
            Err(ConversionError::UnknownCategory(category.to_string()))
        }
    }

    fn category_table(&self, name: &str) -> Result<(Category, &CategoryTable), ConversionError> {
        let category = self.category(name)?;
        self.table
            .get(category)
            .map(|t| (category, t))
            .ok_or_else(|| ConversionError::UnknownCategory(category.to_string()))
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// The category is checked first, then both units. No rounding is applied.
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str, category: &str) -> Result<f64, ConversionError> {
        let (category, table) = self.category_table(category)?;
        let from = normalize_name(from_unit);
        let to = normalize_name(to_unit);

        let invalid: Vec<&str> = [from.as_str(), to.as_str()]
            .into_iter()
            .filter(|u| !table.has_unit(u))
            .collect();
        if !invalid.is_empty() {
            return Err(ConversionError::unknown_units(category, invalid));
        }

        let result = match table {
            CategoryTable::Temperature(rules) => {
                let from_temp: TemperatureUnit = from.parse()?;
                let to_temp: TemperatureUnit = to.parse()?;
                rules.convert(value, from_temp, to_temp)?
            }
            CategoryTable::Linear(_) if from == to => value,
            CategoryTable::Linear(linear) => match (linear.get(&from), linear.get(&to)) {
                (Some(f), Some(t)) => f.convert_to(value, t),
                _ => return Err(ConversionError::unknown_units(category, [from, to])),
            },
        };

        tracing::trace!(%category, value, %from, %to, result, "converted");
        Ok(result)
    }

    /// All category identifiers, in table order
    pub fn get_supported_categories(&self) -> Vec<&'static str> {
        self.table.categories().map(|c| c.as_str()).collect()
    }

    /// All unit names of a category, in table order
    pub fn get_supported_units(&self, category: &str) -> Result<Vec<&'static str>, ConversionError> {
        let (_, table) = self.category_table(category)?;
        Ok(table.unit_names())
    }

    /// Hint text for a category; unknown categories get a fallback, not an error
    pub fn suggest_units(&self, category: &str) -> &'static str {
        match self.category(category) {
            Ok(c) => suggest::suggestion_for(c),
            Err(_) => suggest::NO_SUGGESTIONS,
        }
    }

    /// Base unit of a linear category; `None` for temperature
    pub fn base_unit(&self, category: &str) -> Result<Option<&'static str>, ConversionError> {
        let (_, table) = self.category_table(category)?;
        Ok(match table {
            CategoryTable::Linear(linear) => linear.base().map(|u| u.name),
            CategoryTable::Temperature(_) => None,
        })
    }

    /// Whether `unit` names a unit of `category` (false for unknown categories)
    pub fn has_unit(&self, category: &str, unit: &str) -> bool {
        match self.category_table(category) {
            Ok((_, table)) => table.has_unit(&normalize_name(unit)),
            Err(_) => false,
        }
    }
}
