use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe, or one aggregated grocery item.
///
/// `quantity` defaults to 1 when nothing numeric could be read. `unit` is
/// either an entry of the unit vocabulary or empty; an unrecognised unit word
/// stays in `name` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: String,
}

fn default_quantity() -> f64 {
    1.0
}

impl Ingredient {
    /// An ingredient with no parsed quantity: one of `name`, no unit, no notes.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: default_quantity(),
            unit: String::new(),
            notes: String::new(),
        }
    }

    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
