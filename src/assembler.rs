//! Turns parsed recipe text into a complete [`Recipe`] record.
//!
//! Timings, servings and difficulty are fixed estimates; only the ingredient
//! count and a couple of words in the text influence them.

use std::path::Path;

use chrono::Local;

use crate::models::{DietaryFlags, Ingredient, Recipe, RecipeStatus};
use crate::parser::{FixedVocabulary, RecipeParser, UnitNormalizer};

const MEAT_KEYWORDS: &[&str] = &[
    "beef", "chicken", "pork", "lamb", "fish", "seafood", "bacon", "sausage", "meat", "steak",
    "mince",
];

const REVIEW_NOTE: &str = "Automatically extracted from photo. Please review and edit.";

/// Derives dietary markers from an ingredient list.
pub trait DietaryClassifier {
    fn classify(&self, ingredients: &[Ingredient]) -> DietaryFlags;
}

/// Vegetarian unless an ingredient name contains a meat keyword. Every other
/// flag is left `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeatKeywords;

impl DietaryClassifier for MeatKeywords {
    fn classify(&self, ingredients: &[Ingredient]) -> DietaryFlags {
        let has_meat = ingredients.iter().any(|ingredient| {
            let name = ingredient.name.to_lowercase();
            MEAT_KEYWORDS.iter().any(|keyword| name.contains(keyword))
        });

        DietaryFlags {
            vegetarian: !has_meat,
            ..DietaryFlags::default()
        }
    }
}

pub struct RecipeAssembler<U = FixedVocabulary, D = MeatKeywords> {
    parser: RecipeParser<U>,
    dietary: D,
}

impl Default for RecipeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeAssembler {
    pub fn new() -> Self {
        Self {
            parser: RecipeParser::new(),
            dietary: MeatKeywords,
        }
    }
}

impl<U: UnitNormalizer, D: DietaryClassifier> RecipeAssembler<U, D> {
    pub fn with_strategies(units: U, dietary: D) -> Self {
        Self {
            parser: RecipeParser::with_units(units),
            dietary,
        }
    }

    /// Build a draft recipe from text read off `image`. The recipe has no id
    /// yet; the store assigns one on save.
    pub fn assemble(&self, image: &Path, text: &str) -> Recipe {
        let parsed = self.parser.parse(text);
        let ingredients = parsed.ingredients();

        let prep = prep_time(ingredients.len());
        let cook = cook_time(text);
        let today = Local::now().date_naive();
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut recipe = Recipe::new(parsed.title);
        recipe.category = vec!["uncategorized".to_string()];
        recipe.prep_time_minutes = prep;
        recipe.cook_time_minutes = cook;
        recipe.total_time_minutes = prep + cook;
        recipe.source = Some("photo_ocr".to_string());
        recipe.source_details = Some(format!("OCR from {}", file_name));
        recipe.dietary = self.dietary.classify(&ingredients);
        recipe.ingredients = ingredients;
        recipe.instructions = parsed.instructions;
        recipe.notes = REVIEW_NOTE.to_string();
        recipe.tags = vec!["photo-upload".to_string(), "needs-review".to_string()];
        recipe.image_path = Some(image.display().to_string());
        recipe.ocr_text = Some(text.to_string());
        recipe.created_date = Some(today);
        recipe.last_updated = Some(today);
        recipe.status = RecipeStatus::Draft;
        recipe.needs_review = true;
        recipe
    }
}

fn prep_time(ingredient_count: usize) -> u32 {
    if ingredient_count > 5 {
        30
    } else {
        15
    }
}

fn cook_time(text: &str) -> u32 {
    let text = text.to_lowercase();
    if text.contains("oven") || text.contains("bake") {
        45
    } else {
        20
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn names(names: &[&str]) -> Vec<Ingredient> {
        names.iter().map(|n| Ingredient::bare(*n)).collect()
    }

    #[test]
    fn test_meat_makes_recipe_non_vegetarian() {
        let flags = MeatKeywords.classify(&names(&["Chicken breast", "rice"]));
        assert!(!flags.vegetarian);
    }

    #[test]
    fn test_baking_staples_are_vegetarian() {
        let flags = MeatKeywords.classify(&names(&["flour", "sugar", "butter"]));
        assert!(flags.vegetarian);
        assert!(!flags.vegan);
        assert!(!flags.gluten_free);
        assert!(!flags.dairy_free);
    }

    #[test]
    fn test_keyword_matches_inside_words() {
        assert!(!MeatKeywords.classify(&names(&["Beef mince"])).vegetarian);
        assert!(!MeatKeywords.classify(&names(&["fishcake"])).vegetarian);
    }

    #[test]
    fn test_timings_follow_ingredient_count_and_oven() {
        let short = "Salad\nIngredients:\n1 lettuce\nInstructions:\nToss.\n";
        let recipe = RecipeAssembler::new().assemble(Path::new("salad.jpg"), short);
        assert_eq!(recipe.prep_time_minutes, 15);
        assert_eq!(recipe.cook_time_minutes, 20);
        assert_eq!(recipe.total_time_minutes, 35);

        let long = "Cake\nIngredients:\na\nb\nc\nd\ne\nf\nInstructions:\nBAKE for an hour.\n";
        let recipe = RecipeAssembler::new().assemble(Path::new("cake.jpg"), long);
        assert_eq!(recipe.prep_time_minutes, 30);
        assert_eq!(recipe.cook_time_minutes, 45);
        assert_eq!(recipe.total_time_minutes, 75);
    }

    #[test]
    fn test_assembled_defaults() {
        let recipe = RecipeAssembler::new().assemble(Path::new("/tmp/photos/stew.jpg"), "Stew\n");
        assert_eq!(recipe.name, "Stew");
        assert!(recipe.id.is_empty());
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.status, RecipeStatus::Draft);
        assert!(recipe.needs_review);
        assert_eq!(recipe.category, ["uncategorized"]);
        assert_eq!(recipe.source_details.as_deref(), Some("OCR from stew.jpg"));
        assert_eq!(recipe.ocr_text.as_deref(), Some("Stew\n"));
    }

    struct AlwaysVegan;

    impl DietaryClassifier for AlwaysVegan {
        fn classify(&self, _: &[Ingredient]) -> DietaryFlags {
            DietaryFlags {
                vegetarian: true,
                vegan: true,
                ..DietaryFlags::default()
            }
        }
    }

    #[test]
    fn test_dietary_strategy_is_injectable() {
        let assembler = RecipeAssembler::with_strategies(FixedVocabulary, AlwaysVegan);
        let recipe = assembler.assemble(Path::new("x.jpg"), "Steak\nIngredients:\n1 steak\n");
        assert!(recipe.dietary.vegan);
    }
}
