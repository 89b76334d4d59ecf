//! Grocery lists from meal plans.

use std::collections::HashMap;

use chrono::Local;
use tracing::{debug, info};

use crate::models::{short_id, GroceryList, Ingredient, Recipe};
use crate::planner::load_plan;
use crate::store::{files, RecipeStore, StoreError};

pub struct GroceryAggregator<'a> {
    store: &'a RecipeStore,
}

impl<'a> GroceryAggregator<'a> {
    pub fn new(store: &'a RecipeStore) -> Self {
        Self { store }
    }

    /// Sum the ingredients of every recipe in the plan and save the list to
    /// `grocery-lists/grocery-list-<id>.json`.
    ///
    /// Meals whose recipe has since been removed from the store contribute
    /// nothing.
    pub fn generate(&self, meal_plan_id: &str) -> Result<GroceryList, StoreError> {
        let plan = load_plan(self.store, meal_plan_id)?;

        let recipes = plan.recipe_ids().filter_map(|id| {
            let recipe = self.store.get(id);
            if recipe.is_none() {
                debug!("Recipe {} from plan {} is gone; skipping", id, plan.id);
            }
            recipe
        });
        let items = aggregate(recipes);

        let list = GroceryList {
            id: short_id(),
            meal_plan_id: plan.id.clone(),
            generated_date: Local::now().date_naive(),
            total_items: items.len(),
            items,
        };

        let path = self.store.layout().grocery_list_path(&list.id);
        files::write_json(&path, &list)?;
        info!(
            "Saved grocery list {} with {} items for plan {}",
            list.id, list.total_items, plan.id
        );
        Ok(list)
    }
}

/// Merge ingredients that share both name and unit, summing quantities.
///
/// Items keep the order in which their `(name, unit)` first appeared, and the
/// notes of that first occurrence. Different unit spellings (`tsp` and
/// `teaspoon`) stay separate entries.
pub fn aggregate<'r>(recipes: impl IntoIterator<Item = &'r Recipe>) -> Vec<Ingredient> {
    let mut items: Vec<Ingredient> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for ingredient in recipes.into_iter().flat_map(|r| r.ingredients.iter()) {
        let key = (ingredient.name.clone(), ingredient.unit.clone());
        match index.get(&key) {
            Some(&i) => items[i].quantity += ingredient.quantity,
            None => {
                index.insert(key, items.len());
                items.push(ingredient.clone());
            }
        }
    }

    items
}
