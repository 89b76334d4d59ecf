//! Photo ingestion: image in, reviewed-later recipe out.
//!
//! The pipeline runs OCR on the photo, assembles a draft recipe, lets a
//! `recipe: <name>` caption override the extracted title, saves the recipe to
//! the local store and hands a copy to a cloud sink. Both OCR and the sink are
//! strategies; the defaults are stand-ins that never leave the machine.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::assembler::{DietaryClassifier, RecipeAssembler};
use crate::models::Recipe;
use crate::ocr::{OcrError, OcrProvider};
use crate::parser::UnitNormalizer;
use crate::store::{RecipeStore, StoreError};

static CAPTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)recipe:\s*(.+)").expect("caption pattern"));

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Upload failed: {0}")]
    Upload(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Confirmation returned by a [`CloudSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    pub recipe_id: String,
    pub filename: String,
    pub message: String,
}

/// Somewhere off-machine that keeps a copy of each recipe.
pub trait CloudSink {
    fn upload(&self, recipe_id: &str, payload: &Value) -> Result<UploadReceipt, SinkError>;
}

/// Pretends to upload to Google Drive and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDriveSink;

impl CloudSink for MockDriveSink {
    fn upload(&self, recipe_id: &str, payload: &Value) -> Result<UploadReceipt, SinkError> {
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(recipe_id);
        info!("Would upload recipe to Google Drive: {}", name);

        Ok(UploadReceipt {
            success: true,
            recipe_id: recipe_id.to_string(),
            filename: format!("{}.json", recipe_id),
            message: "Recipe saved to Google Drive (mock)".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Ingestion {
    pub recipe: Recipe,
    pub upload: UploadReceipt,
    pub needs_review: bool,
    pub summary: String,
}

pub struct Ingestor<O, S> {
    ocr: O,
    sink: S,
}

impl<O: OcrProvider, S: CloudSink> Ingestor<O, S> {
    pub fn new(ocr: O, sink: S) -> Self {
        Self { ocr, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn process_photo<U, D>(
        &self,
        store: &mut RecipeStore,
        assembler: &RecipeAssembler<U, D>,
        image: &Path,
        caption: Option<&str>,
    ) -> Result<Ingestion, IngestError>
    where
        U: UnitNormalizer,
        D: DietaryClassifier,
    {
        info!("Processing photo {}", image.display());
        let text = self.ocr.extract_text(image)?;

        let mut recipe = assembler.assemble(image, &text);
        if let Some(name) = caption.and_then(caption_name) {
            recipe.name = name;
        }

        let recipe = store.save(recipe)?;
        let payload = serde_json::to_value(&recipe).map_err(|e| SinkError::Upload(e.to_string()))?;
        let upload = self.sink.upload(&recipe.id, &payload)?;

        let summary = format!(
            "Extracted '{}' with {} ingredients",
            recipe.name,
            recipe.ingredients.len()
        );
        Ok(Ingestion {
            needs_review: recipe.needs_review,
            recipe,
            upload,
            summary,
        })
    }
}

/// The name after `recipe:` in a caption, if there is one.
pub fn caption_name(caption: &str) -> Option<String> {
    let caps = CAPTION_NAME.captures(caption)?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| name.to_string())
}
