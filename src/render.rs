//! Plain-text rendering of store data for the terminal.

use std::fmt::Write;

use crate::models::{GroceryList, Ingredient, MealPlan, Recipe, RecipeStats};

/// `2 cups flour`, `1 eggs`, `0.5 tsp salt`. Whole quantities print without
/// a decimal point.
pub fn ingredient_line(ingredient: &Ingredient) -> String {
    let mut line = format_quantity(ingredient.quantity);
    if !ingredient.unit.is_empty() {
        line.push(' ');
        line.push_str(&ingredient.unit);
    }
    line.push(' ');
    line.push_str(&ingredient.name);
    if !ingredient.notes.is_empty() {
        let _ = write!(line, " ({})", ingredient.notes);
    }
    line
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// Numbered summary list used by `list` and `search`.
pub fn recipe_list(recipes: &[&Recipe]) -> String {
    let mut out = String::new();
    for (i, recipe) in recipes.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({} min) [{}]",
            i + 1,
            recipe.name,
            recipe.prep_time_minutes,
            recipe.id
        );
        if !recipe.category.is_empty() {
            let _ = writeln!(out, "   Categories: {}", recipe.category.join(", "));
        }
    }
    out
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", recipe.name);
    let _ = writeln!(out, "ID: {}", recipe.id);
    let _ = writeln!(out, "Categories: {}", recipe.category.join(", "));
    let _ = writeln!(out, "Prep time: {} minutes", recipe.prep_time_minutes);
    let _ = writeln!(out, "Cook time: {} minutes", recipe.cook_time_minutes);
    let _ = writeln!(out, "Servings: {}", recipe.servings);
    let _ = writeln!(out, "Difficulty: {}", recipe.difficulty.as_str());
    let _ = writeln!(out, "Status: {}", recipe.status.as_str());

    if !recipe.ingredients.is_empty() {
        out.push_str("\nIngredients:\n");
        for ingredient in &recipe.ingredients {
            let _ = writeln!(out, "  {}", ingredient_line(ingredient));
        }
    }

    if !recipe.instructions.is_empty() {
        out.push_str("\nInstructions:\n");
        for (i, step) in recipe.instructions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, step);
        }
    }

    if !recipe.notes.is_empty() {
        let _ = write!(out, "\nNotes: {}\n", recipe.notes);
    }
    out
}

pub fn meal_plan(plan: &MealPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Meal Plan ID: {}", plan.id);
    let _ = writeln!(out, "Dates: {} to {}", plan.start_date, plan.end_date);
    out.push_str("\nMeals:\n");
    for meal in &plan.meals {
        let _ = writeln!(out, "  {} ({}): {}", meal.date, meal.day, meal.recipe_name);
    }
    out
}

pub fn grocery_list(list: &GroceryList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grocery List ID: {}", list.id);
    let _ = writeln!(out, "Total items: {}", list.total_items);
    out.push_str("\nItems:\n");
    for item in &list.items {
        let _ = writeln!(out, "  {}", ingredient_line(item));
    }
    out
}

pub fn stats(stats: &RecipeStats) -> String {
    let mut out = String::new();
    out.push_str("=== Recipe Database Statistics ===\n");
    let _ = writeln!(out, "Total recipes: {}", stats.total_recipes);
    let _ = writeln!(out, "Categories: {}", stats.categories.join(", "));
    let _ = writeln!(out, "Average prep time: {:.1} minutes", stats.avg_prep_time);
    let _ = writeln!(out, "Average cook time: {:.1} minutes", stats.avg_cook_time);
    let _ = writeln!(out, "Meal plans: {}", stats.meal_plans_count);
    let _ = writeln!(out, "Grocery lists: {}", stats.grocery_lists_count);
    out
}
