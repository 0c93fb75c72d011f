//! Unitconv Units - Table-driven unit conversion
//!
//! Converts values between units of the same category.
//! Linear categories go through a base unit; temperature uses explicit
//! affine rules for each ordered pair of units.
//!
//! Categories:
//! - Length (meter, kilometer, inch, foot, mile, ...)
//! - Mass (kilogram, gram, pound, ounce, ...)
//! - Temperature (celsius, fahrenheit, kelvin)
//! - Time (second, minute, hour, day, week)
//! - Volume (liter, milliliter, gallon, cup, ...)

mod unit;
mod table;
mod engine;
mod suggest;
pub mod temperature;

pub use unit::UnitDefinition;
pub use table::{CategoryTable, ConversionTable, LinearTable};
pub use engine::ConversionEngine;
pub use suggest::{suggest, suggestion_for, NO_SUGGESTIONS};
pub use temperature::{TemperatureRule, TemperatureRules, TemperatureUnit};

pub use unitconv_core::{Category, ConversionError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_every_category() {
        for category in Category::ALL {
            assert_ne!(suggestion_for(category), NO_SUGGESTIONS);
            assert_eq!(suggest(category.as_str()), suggestion_for(category));
        }
        assert_eq!(suggest("bogus"), NO_SUGGESTIONS);
    }

    #[test]
    fn test_table_serializes() {
        let json = serde_json::to_value(ConversionTable::builtin()).unwrap();
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0][0], "length");
        assert_eq!(entries[0][1]["kind"], "linear");
        assert_eq!(entries[2][1]["kind"], "temperature");
    }
}
