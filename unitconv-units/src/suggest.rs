//! Human-readable unit hints per category

use unitconv_core::Category;

/// Returned for any category name without a hint
pub const NO_SUGGESTIONS: &str = "No suggestions available for this category.";

pub fn suggestion_for(category: Category) -> &'static str {
    match category {
        Category::Length => "Common units: meter, kilometer, inch, foot, mile",
        Category::Mass => "Common units: kilogram, gram, pound, ounce",
        Category::Temperature => "Common units: celsius, fahrenheit, kelvin",
        Category::Time => "Common units: second, minute, hour, day",
        Category::Volume => "Common units: liter, gallon, milliliter, cup",
    }
}

/// Hint for a raw category name; never fails
pub fn suggest(category: &str) -> &'static str {
    category
        .parse::<Category>()
        .map(suggestion_for)
        .unwrap_or(NO_SUGGESTIONS)
}
