//! Domain models for the recipe database.
//!
//! # Core Concepts
//!
//! - [`Recipe`]: One dish, stored as its own JSON file and owned by the
//!   [`RecipeStore`](crate::store::RecipeStore).
//! - [`Ingredient`]: A parsed ingredient line; also the item type of a grocery list.
//! - [`MealPlan`]: A dated sequence of dinners referencing recipes by id.
//!   Immutable once generated.
//! - [`GroceryList`]: Ingredient totals for one meal plan, keyed by name and unit.
//!
//! Read-only views computed by the store ([`RecipeStats`], [`RecipeExport`])
//! live here too so the CLI can print or serialize them directly.

mod grocery;
mod ingredient;
mod meal_plan;
mod recipe;

pub use grocery::*;
pub use ingredient::*;
pub use meal_plan::*;
pub use recipe::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a short opaque identifier: the first 8 hex digits of a v4 UUID.
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Counts and averages over the store's current in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStats {
    pub total_recipes: usize,
    pub categories: Vec<String>,
    pub avg_prep_time: f64,
    pub avg_cook_time: f64,
    pub meal_plans_count: usize,
    pub grocery_lists_count: usize,
}

/// Every recipe in one file, written by `export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeExport {
    pub export_date: NaiveDate,
    pub total_recipes: usize,
    pub recipes: Vec<Recipe>,
}
