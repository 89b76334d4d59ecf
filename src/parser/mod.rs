//! Free-text recipe parsing.
//!
//! [`sections`] finds the title and groups lines, [`ingredient`] and
//! [`instruction`] read the individual lines. [`RecipeParser`] runs all three
//! over one block of text.

pub mod ingredient;
pub mod instruction;
pub mod sections;
pub mod units;

pub use ingredient::{IngredientParser, MatchRule, ParsedIngredient};
pub use sections::{classify, extract_title, Sections};
pub use units::{FixedVocabulary, UnitNormalizer};

use crate::models::Ingredient;

/// Everything read out of one block of recipe text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedText {
    pub title: String,
    pub ingredients: Vec<ParsedIngredient>,
    pub instructions: Vec<String>,
}

impl ParsedText {
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.iter().map(|p| p.ingredient.clone()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeParser<U = FixedVocabulary> {
    ingredients: IngredientParser<U>,
}

impl RecipeParser<FixedVocabulary> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U: UnitNormalizer> RecipeParser<U> {
    pub fn with_units(units: U) -> Self {
        Self {
            ingredients: IngredientParser::with_units(units),
        }
    }

    pub fn parse(&self, text: &str) -> ParsedText {
        let sections = classify(text);

        let ingredients = sections
            .ingredient_lines
            .iter()
            .filter_map(|line| self.ingredients.parse_line(line))
            .collect();

        let instructions = sections
            .instruction_lines
            .iter()
            .filter_map(|line| instruction::parse_step(line))
            .collect();

        ParsedText {
            title: sections.title,
            ingredients,
            instructions,
        }
    }
}
