//! Random dinner planning over the recipe store.
//!
//! Recipes are drawn uniformly at random without replacement. When the store
//! holds fewer recipes than requested days, the id pool is repeated until it
//! is long enough, so the same recipe can come up more than once. That is
//! accepted behaviour for a small collection, not a bug.

use chrono::{Days, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::models::{short_id, Meal, MealPlan, MealType, PlanPreferences};
use crate::store::{files, validate_id, RecipeStore, StoreError};

/// Longest plan that will be drawn up in one go.
pub const MAX_PLAN_DAYS: u32 = 366;

pub struct MealPlanner<'a> {
    store: &'a RecipeStore,
}

impl<'a> MealPlanner<'a> {
    pub fn new(store: &'a RecipeStore) -> Self {
        Self { store }
    }

    /// Plan `days` dinners starting today and save the plan.
    pub fn generate(
        &self,
        days: u32,
        preferences: Option<PlanPreferences>,
    ) -> Result<MealPlan, StoreError> {
        let today = Local::now().date_naive();
        self.generate_with(days, preferences, today, &mut rand::thread_rng())
    }

    /// Plan `days` dinners starting at `start`, drawing with `rng`, and save
    /// the plan to `meal-plans/meal-plan-<id>.json`.
    ///
    /// At most [`MAX_PLAN_DAYS`] days, and the whole run of dates must be
    /// representable.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        days: u32,
        preferences: Option<PlanPreferences>,
        start: NaiveDate,
        rng: &mut R,
    ) -> Result<MealPlan, StoreError> {
        // TODO: filter the pool by max_cooking_time and reserve vegetarian/leftover nights.
        let preferences = preferences.unwrap_or_default();
        debug!("Planning {} days with {:?}", days, preferences);

        if days > MAX_PLAN_DAYS {
            return Err(StoreError::PlanTooLong {
                days,
                max: MAX_PLAN_DAYS,
            });
        }
        let end_date = start
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(StoreError::DateOutOfRange { start, days })?;

        let wanted = days as usize;
        let ids = self.store.ids();
        if ids.is_empty() && wanted > 0 {
            return Err(StoreError::EmptyStore);
        }

        let pool: Vec<String> = if ids.len() < wanted {
            warn!(
                "Only {} recipes available for {} days; recipes will repeat",
                ids.len(),
                days
            );
            let copies = wanted / ids.len() + 1;
            ids.iter().cycle().take(ids.len() * copies).cloned().collect()
        } else {
            ids
        };

        let mut meals = Vec::with_capacity(wanted);
        for (offset, recipe_id) in pool.choose_multiple(rng, wanted).enumerate() {
            let recipe = self.store.require(recipe_id)?;
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .ok_or(StoreError::DateOutOfRange { start, days })?;
            meals.push(Meal {
                date,
                day: date.format("%A").to_string(),
                recipe_id: recipe.id.clone(),
                recipe_name: recipe.name.clone(),
                meal_type: MealType::Dinner,
            });
        }

        let plan = MealPlan {
            id: short_id(),
            start_date: start,
            end_date,
            days,
            meals,
        };

        let path = self.store.layout().meal_plan_path(&plan.id);
        files::write_json(&path, &plan)?;
        info!("Saved {}-day meal plan {}", days, plan.id);
        Ok(plan)
    }

    /// Read a previously generated plan.
    pub fn load(&self, id: &str) -> Result<MealPlan, StoreError> {
        load_plan(self.store, id)
    }
}

pub(crate) fn load_plan(store: &RecipeStore, id: &str) -> Result<MealPlan, StoreError> {
    validate_id(id)?;
    let path = store.layout().meal_plan_path(id);
    files::read_json(&path).map_err(|e| match e {
        StoreError::FileNotFound(_) => StoreError::meal_plan_not_found(id),
        other => other,
    })
}
