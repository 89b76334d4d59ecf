use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Ingredient;

/// Ingredients summed across every recipe of one meal plan.
///
/// Generated once per request and never recomputed: if the source plan or its
/// recipes change afterwards, the list goes stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub id: String,
    pub meal_plan_id: String,
    pub generated_date: NaiveDate,
    /// One entry per distinct `(name, unit)`, in order of first appearance.
    pub items: Vec<Ingredient>,
    pub total_items: usize,
}
