//! Unit categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::ConversionError;

/// A domain of commensurable units.
///
/// The declaration order is the order in which categories are listed to
/// users and iterated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Time,
    Volume,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 5] = [
        Category::Length,
        Category::Mass,
        Category::Temperature,
        Category::Time,
        Category::Volume,
    ];

    /// Lowercase identifier (e.g. "length")
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Temperature => "temperature",
            Category::Time => "time",
            Category::Volume => "volume",
        }
    }

    /// Whether units of this category convert through a single base factor
    pub fn is_linear(&self) -> bool {
        !matches!(self, Category::Temperature)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = crate::normalize_name(s);
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or(ConversionError::UnknownCategory(name))
    }
}
