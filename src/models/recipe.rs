use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Ingredient;

/// One dish as stored in `data/<id>.json`.
///
/// The `id` is assigned once by the store and never changes afterwards.
/// Uniqueness is the store's concern, not the record's: two `Recipe` values
/// with the same id are simply two versions of the same file.
///
/// Every field except `name` is defaulted on read so that hand-written
/// partial files can be added. Keys the record does not know about are kept
/// in `extra` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub total_time_minutes: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_details: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Raw OCR output the record was assembled from, kept for review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub dietary: DietaryFlags,
    #[serde(default)]
    pub status: RecipeStatus,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_servings() -> u32 {
    4
}

fn default_rating() -> u8 {
    3
}

impl Recipe {
    /// A recipe with the given name and every other field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            category: Vec::new(),
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            total_time_minutes: 0,
            servings: default_servings(),
            difficulty: Difficulty::default(),
            source: None,
            source_details: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            notes: String::new(),
            tags: Vec::new(),
            image_path: None,
            ocr_text: None,
            created_date: None,
            last_updated: None,
            rating: default_rating(),
            dietary: DietaryFlags::default(),
            status: RecipeStatus::default(),
            needs_review: false,
            extra: Map::new(),
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category.iter().any(|c| c == category)
    }

    /// Case-insensitive substring match over name, tags and categories.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
            || self.category.iter().any(|c| c.to_lowercase().contains(&term))
    }
}

/// How demanding a recipe is to cook.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Review state of a recipe record.
///
/// - `Draft`: freshly assembled, nobody has looked at it yet
/// - `NeedsReview`: flagged for a human pass
/// - `Final`: reviewed and trusted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecipeStatus {
    #[default]
    Draft,
    NeedsReview,
    Final,
}

impl RecipeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::NeedsReview => "needs_review",
            Self::Final => "final",
        }
    }
}

/// Heuristic dietary markers. Only `vegetarian` is ever derived; the rest
/// stay `false` until someone sets them by hand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DietaryFlags {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
}
