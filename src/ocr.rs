//! Text extraction from recipe photos.
//!
//! Only a fixed-output stub exists. A real backend implements
//! [`OcrProvider`] with the same image-path-in, text-out contract.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("OCR backend failed: {0}")]
    Backend(String),
}

pub trait OcrProvider {
    fn extract_text(&self, image: &Path) -> Result<String, OcrError>;
}

const SAMPLE_TEXT: &str = "Easy Chocolate Chip Cookies

Ingredients:
2 1/4 cups all-purpose flour
1 teaspoon baking soda
1 teaspoon salt
1 cup butter, softened
3/4 cup granulated sugar
3/4 cup packed brown sugar
1 teaspoon vanilla extract
2 large eggs
2 cups semisweet chocolate chips
1 cup chopped nuts (optional)

Instructions:
1. Preheat oven to 375°F (190°C).
2. In small bowl, mix flour, baking soda and salt; set aside.
3. In large bowl, beat butter, granulated sugar, brown sugar and vanilla until creamy.
4. Add eggs, one at a time, beating well after each addition.
5. Gradually beat in flour mixture.
6. Stir in chocolate chips and nuts.
7. Drop by rounded tablespoon onto ungreased baking sheets.
8. Bake 9 to 11 minutes or until golden brown.
9. Cool on baking sheets for 2 minutes; remove to wire racks to cool completely.

Makes about 5 dozen cookies.";

/// Returns the same cookie recipe for every image. The image itself is
/// never opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubOcr;

impl OcrProvider for StubOcr {
    fn extract_text(&self, image: &Path) -> Result<String, OcrError> {
        info!("Running stub OCR on {}", image.display());
        Ok(SAMPLE_TEXT.to_string())
    }
}
