//! Splits free recipe text into a title and ingredient/instruction line groups.
//!
//! The text is scanned once, top to bottom. An ingredient header opens the
//! ingredient section, which runs until the next instruction header. An
//! instruction header opens the instruction section, which runs to the end of
//! the text. Lines before the first header are ignored, apart from the title.

use once_cell::sync::Lazy;
use regex::Regex;

pub const UNTITLED: &str = "Unnamed Recipe";

static INGREDIENT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ingredients?|what you need|you will need):?$").expect("ingredient header")
});

static INSTRUCTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(instructions?|method|directions|preparation|steps?):?$")
        .expect("instruction header")
});

/// Header-like lines that are never a title even though they open no section.
static METADATA_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(serves|prep time|total time):?$").expect("metadata header")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Ingredients,
    Instructions,
}

/// Raw, trimmed lines grouped by section, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub title: String,
    pub ingredient_lines: Vec<String>,
    pub instruction_lines: Vec<String>,
}

pub fn is_ingredient_header(line: &str) -> bool {
    INGREDIENT_HEADER.is_match(&line.trim().to_lowercase())
}

pub fn is_instruction_header(line: &str) -> bool {
    INSTRUCTION_HEADER.is_match(&line.trim().to_lowercase())
}

fn is_header(line: &str) -> bool {
    is_ingredient_header(line)
        || is_instruction_header(line)
        || METADATA_HEADER.is_match(&line.trim().to_lowercase())
}

/// First non-empty, non-header line of 4 to 99 characters, or [`UNTITLED`].
pub fn extract_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            (4..100).contains(&len) && !is_header(line)
        })
        .unwrap_or(UNTITLED)
        .to_string()
}

pub fn classify(text: &str) -> Sections {
    let mut section = Section::Preamble;
    let mut ingredient_lines = Vec::new();
    let mut instruction_lines = Vec::new();

    for line in text.lines().map(str::trim) {
        match section {
            Section::Instructions => {
                if line.is_empty() || is_instruction_header(line) {
                    continue;
                }
                instruction_lines.push(line.to_string());
            }
            Section::Preamble | Section::Ingredients => {
                if is_instruction_header(line) {
                    section = Section::Instructions;
                } else if is_ingredient_header(line) {
                    section = Section::Ingredients;
                } else if section == Section::Ingredients && !line.is_empty() {
                    ingredient_lines.push(line.to_string());
                }
            }
        }
    }

    Sections {
        title: extract_title(text),
        ingredient_lines,
        instruction_lines,
    }
}
