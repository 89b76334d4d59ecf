//! Flat-file recipe store.
//!
//! Every recipe lives in its own `data/<id>.json` file. [`RecipeStore`] reads
//! all of them into memory when opened and is the only writer of those files
//! afterwards. There is no locking: concurrent processes writing the same
//! directory race, and the last write wins. Writes go through a temp file and
//! rename so a reader never sees a half-written recipe.

pub mod files;
mod layout;

pub use layout::Layout;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{short_id, Recipe, RecipeExport, RecipeStats};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Recipe file has no id: {}", .0.display())]
    MissingId(PathBuf),

    #[error("Invalid id {0:?}: ids may not contain '/', '\\' or '..'")]
    InvalidId(String),

    #[error("No recipes available to plan with")]
    EmptyStore,

    #[error("Cannot plan {days} days; the limit is {max}")]
    PlanTooLong { days: u32, max: u32 },

    #[error("A {days}-day plan starting {start} runs past the last supported date")]
    DateOutOfRange { start: NaiveDate, days: u32 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move temp file into {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
    },
}

impl StoreError {
    pub fn recipe_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Recipe",
            id: id.into(),
        }
    }

    pub fn meal_plan_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Meal plan",
            id: id.into(),
        }
    }
}

/// Outcome of reading the recipe directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// Files that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, StoreError)>,
}

pub struct RecipeStore {
    layout: Layout,
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeStore {
    /// Create the layout directories under `layout` and load every recipe.
    pub fn open(layout: Layout) -> Result<Self, StoreError> {
        layout.ensure()?;
        let mut store = Self {
            layout,
            recipes: BTreeMap::new(),
        };
        let report = store.load()?;
        info!(
            "Loaded {} recipes from {} ({} skipped)",
            report.loaded,
            store.layout.recipes_dir().display(),
            report.skipped.len()
        );
        Ok(store)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Replace the in-memory map with the current contents of `data/`.
    ///
    /// A file that fails to parse or has no `id` is logged and skipped; it
    /// never aborts the rest of the pass.
    pub fn load(&mut self) -> Result<LoadReport, StoreError> {
        let mut recipes = BTreeMap::new();
        let mut report = LoadReport::default();

        for path in files::json_files(&self.layout.recipes_dir())? {
            match read_recipe(&path) {
                Ok(recipe) => {
                    if path.file_stem().is_some_and(|stem| stem != recipe.id.as_str()) {
                        warn!(
                            "Recipe file {} holds id {}; indexing by the id",
                            path.display(),
                            recipe.id
                        );
                    }
                    if let Some(previous) = recipes.insert(recipe.id.clone(), recipe) {
                        warn!("Duplicate recipe id {}; keeping {}", previous.id, path.display());
                    }
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.skipped.push((path, e));
                }
            }
        }

        self.recipes = recipes;
        Ok(report)
    }

    /// Write `recipe` to `data/<id>.json` and index it.
    ///
    /// An empty or blank id is replaced by a fresh one; an id that would
    /// escape `data/` is rejected. `created_date` is stamped if it
    /// is missing and `last_updated` is always set to today. An existing file
    /// with the same id is overwritten.
    pub fn save(&mut self, mut recipe: Recipe) -> Result<Recipe, StoreError> {
        if recipe.id.trim().is_empty() {
            recipe.id = self.fresh_id();
        } else {
            validate_id(&recipe.id)?;
        }
        let today = Local::now().date_naive();
        recipe.created_date.get_or_insert(today);
        recipe.last_updated = Some(today);

        let path = self.layout.recipe_path(&recipe.id);
        files::write_json(&path, &recipe)?;
        debug!("Saved recipe {} to {}", recipe.id, path.display());

        self.recipes.insert(recipe.id.clone(), recipe.clone());
        Ok(recipe)
    }

    /// Read a recipe from an arbitrary JSON file and save it into the store.
    pub fn add_from_file(&mut self, path: &Path) -> Result<Recipe, StoreError> {
        let recipe: Recipe = files::read_json(path)?;
        let recipe = self.save(recipe)?;
        info!("Added recipe {} ({})", recipe.id, recipe.name);
        Ok(recipe)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = short_id();
            if !self.recipes.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Like [`get`](Self::get), but a miss is an error.
    pub fn require(&self, id: &str) -> Result<&Recipe, StoreError> {
        self.get(id).ok_or_else(|| StoreError::recipe_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipe ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        self.recipes.keys().cloned().collect()
    }

    /// All recipes, or only those tagged with `category`.
    pub fn list(&self, category: Option<&str>) -> Vec<&Recipe> {
        self.recipes
            .values()
            .filter(|r| category.map_or(true, |c| r.has_category(c)))
            .collect()
    }

    pub fn search(&self, term: &str) -> Vec<&Recipe> {
        self.recipes.values().filter(|r| r.matches(term)).collect()
    }

    /// Distinct categories across all recipes, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.recipes
            .values()
            .flat_map(|r| r.category.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn category_counts(&self) -> Vec<(String, usize)> {
        self.categories()
            .into_iter()
            .map(|c| {
                let count = self.list(Some(c.as_str())).len();
                (c, count)
            })
            .collect()
    }

    pub fn stats(&self) -> Result<RecipeStats, StoreError> {
        let average = |minutes: fn(&Recipe) -> u32| {
            if self.recipes.is_empty() {
                0.0
            } else {
                let total: u64 = self.recipes.values().map(|r| u64::from(minutes(r))).sum();
                total as f64 / self.recipes.len() as f64
            }
        };

        Ok(RecipeStats {
            total_recipes: self.recipes.len(),
            categories: self.categories(),
            avg_prep_time: average(|r| r.prep_time_minutes),
            avg_cook_time: average(|r| r.cook_time_minutes),
            meal_plans_count: files::json_files(&self.layout.meal_plans_dir())?.len(),
            grocery_lists_count: files::json_files(&self.layout.grocery_lists_dir())?.len(),
        })
    }

    /// Write every recipe to a single file at `path`.
    pub fn export(&self, path: &Path) -> Result<RecipeExport, StoreError> {
        let export = RecipeExport {
            export_date: Local::now().date_naive(),
            total_recipes: self.recipes.len(),
            recipes: self.recipes.values().cloned().collect(),
        };
        files::write_json(path, &export)?;
        info!("Exported {} recipes to {}", export.total_recipes, path.display());
        Ok(export)
    }
}

fn read_recipe(path: &Path) -> Result<Recipe, StoreError> {
    let recipe: Recipe = files::read_json(path)?;
    if recipe.id.trim().is_empty() {
        return Err(StoreError::MissingId(path.to_path_buf()));
    }
    validate_id(&recipe.id)?;
    Ok(recipe)
}

/// Ids become file names, so they must not contain path separators or `..`.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}
