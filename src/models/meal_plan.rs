use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated run of dinners, written once to `meal-plans/meal-plan-<id>.json`.
///
/// Plans are immutable after generation. Each meal freezes the recipe name
/// as it was when the plan was drawn up, so later edits to a recipe are not
/// reflected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub start_date: NaiveDate,
    /// `start_date + days`, one past the last planned dinner.
    pub end_date: NaiveDate,
    pub days: u32,
    pub meals: Vec<Meal>,
}

impl MealPlan {
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.meals.iter().map(|m| m.recipe_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub date: NaiveDate,
    /// Weekday name, e.g. `Monday`.
    pub day: String,
    pub recipe_id: String,
    pub recipe_name: String,
    pub meal_type: MealType,
}

/// Only dinners are planned.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    #[default]
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dinner => "dinner",
        }
    }
}

/// Planning preferences. Accepted and logged, but the planner does not act
/// on any of them yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanPreferences {
    /// Upper bound on `total_time_minutes` for a planned dinner.
    pub max_cooking_time: u32,
    /// Number of meat-free dinners wanted per plan.
    pub vegetarian_days: u32,
    /// Number of nights left free for leftovers.
    pub leftover_nights: u32,
}

impl Default for PlanPreferences {
    fn default() -> Self {
        Self {
            max_cooking_time: 60,
            vegetarian_days: 2,
            leftover_nights: 1,
        }
    }
}
