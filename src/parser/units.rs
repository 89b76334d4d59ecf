//! Unit vocabulary used when reading ingredient lines.

/// Decides whether a word captured after a quantity is a measurement unit.
///
/// Returns the unit as it should be stored, or `None` if the word belongs to
/// the ingredient name instead (`"3 large eggs"`).
pub trait UnitNormalizer {
    fn normalize(&self, token: &str) -> Option<String>;
}

/// Units recognised out of the box. Singular and plural forms are listed
/// separately and are not unified.
pub const UNITS: &[&str] = &[
    "cup", "cups", "tbsp", "tablespoon", "tablespoons", "tsp", "teaspoon", "teaspoons", "ml",
    "milliliter", "milliliters", "l", "liter", "liters", "g", "gram", "grams", "kg", "kilogram",
    "oz", "ounce", "ounces", "lb", "pound", "pounds", "clove", "cloves", "piece", "pieces",
    "slice", "slices", "can", "cans", "package", "packages", "bunch", "bunches", "pinch", "dash",
    "to taste",
];

/// Case-folds a token and keeps it if it appears in [`UNITS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedVocabulary;

impl UnitNormalizer for FixedVocabulary {
    fn normalize(&self, token: &str) -> Option<String> {
        let folded = token.to_lowercase();
        UNITS.contains(&folded.as_str()).then_some(folded)
    }
}
