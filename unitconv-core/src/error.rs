//! Structured conversion errors
//!
//! Every failure of the engine is a distinguishable value. User-input
//! failures (unknown category, unknown unit) are plain errors; failures that
//! can only come from an inconsistent built-in table are fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::Category;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNSUPPORTED_TEMPERATURE: &str = "UNSUPPORTED_TEMPERATURE";
    pub const INVALID_TABLE: &str = "INVALID_TABLE";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Bad input; the caller may ask again
    Error,
    /// The engine itself is inconsistent
    Fatal,
}

/// Errors raised by the conversion engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Category is not present in the conversion table
    #[error("Category '{0}' not supported.")]
    UnknownCategory(String),

    /// One or both unit names are not defined within the category
    #[error("{} not supported for category '{}'.", describe_units(.units), .category)]
    UnknownUnit {
        category: Category,
        units: Vec<String>,
    },

    /// No temperature rule covers the (from, to) pair
    #[error("Unsupported temperature conversion: {from} -> {to}.")]
    UnsupportedTemperatureConversion { from: String, to: String },

    /// The built-in table violates one of its invariants
    #[error("Invalid conversion table: {0}")]
    InvalidTable(String),
}

fn describe_units(units: &[String]) -> String {
    let quoted: Vec<String> = units.iter().map(|u| format!("'{}'", u)).collect();
    match quoted.len() {
        1 => format!("Unit {}", quoted[0]),
        _ => format!("Units {}", quoted.join(" and ")),
    }
}

impl ConversionError {
    /// Build an `UnknownUnit` error listing each invalid name once
    pub fn unknown_units<I, S>(category: Category, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for unit in units {
            let unit = unit.into();
            if !names.contains(&unit) {
                names.push(unit);
            }
        }
        ConversionError::UnknownUnit { category, units: names }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            ConversionError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConversionError::UnsupportedTemperatureConversion { .. } => codes::UNSUPPORTED_TEMPERATURE,
            ConversionError::InvalidTable(_) => codes::INVALID_TABLE,
        }
    }

    /// Suggestion for fixing the error, when one exists
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConversionError::UnknownCategory(_) => {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                Some(format!("Use one of: {}", names.join(", ")))
            }
            ConversionError::UnknownUnit { category, .. } => {
                Some(format!("List the units of '{}' before converting", category))
            }
            ConversionError::UnsupportedTemperatureConversion { .. }
            | ConversionError::InvalidTable(_) => Some("This is a bug, please report it".to_string()),
        }
    }

    pub fn severity(&self) -> Severity {
        if self.is_internal() {
            Severity::Fatal
        } else {
            Severity::Error
        }
    }

    /// True for failures that no user input can cause
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ConversionError::UnsupportedTemperatureConversion { .. } | ConversionError::InvalidTable(_)
        )
    }

    /// Structured view of this error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
            severity: self.severity(),
        }
    }
}

/// Structured error for display or JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    pub severity: Severity,
}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        err.report()
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
