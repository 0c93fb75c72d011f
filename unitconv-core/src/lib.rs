//! Unitconv Core - Fundamental types
//!
//! This crate provides the core types shared by the engine and the shell:
//! - `Category`: the fixed set of unit categories
//! - `ConversionError`: the error taxonomy of the conversion engine
//! - `ErrorReport`: a structured, serializable view of an error

mod category;
mod error;

pub use category::Category;
pub use error::{ConversionError, ErrorReport, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Category, ConversionError, ErrorReport, Severity};
    pub use crate::error::codes;
}

/// Normalize a user-supplied category or unit name (trim, lowercase)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Meter "), "meter");
        assert_eq!(normalize_name("KELVIN"), "kelvin");
        assert_eq!(normalize_name(""), "");
    }
}
