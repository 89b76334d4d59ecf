use std::fs;
use std::path::{Path, PathBuf};

use super::StoreError;

/// Directory layout under the data root.
///
/// ```text
/// <root>/
///   data/                          <id>.json, one per recipe
///   images/                        source photos
///   meal-plans/                    meal-plan-<id>.json
///   grocery-lists/                 grocery-list-<id>.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn recipes_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn meal_plans_dir(&self) -> PathBuf {
        self.root.join("meal-plans")
    }

    pub fn grocery_lists_dir(&self) -> PathBuf {
        self.root.join("grocery-lists")
    }

    pub fn recipe_path(&self, id: &str) -> PathBuf {
        self.recipes_dir().join(format!("{}.json", id))
    }

    pub fn meal_plan_path(&self, id: &str) -> PathBuf {
        self.meal_plans_dir().join(format!("meal-plan-{}.json", id))
    }

    pub fn grocery_list_path(&self, id: &str) -> PathBuf {
        self.grocery_lists_dir()
            .join(format!("grocery-list-{}.json", id))
    }

    /// Create every directory of the layout that does not exist yet.
    pub fn ensure(&self) -> Result<(), StoreError> {
        for dir in [
            self.recipes_dir(),
            self.images_dir(),
            self.meal_plans_dir(),
            self.grocery_lists_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir, source })?;
        }
        Ok(())
    }
}
